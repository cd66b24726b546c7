//! Codec between [`QueryState`] and the location query string.
//!
//! | Param         | Format                                  |
//! |---------------|-----------------------------------------|
//! | `search`      | free text                               |
//! | `consultType` | `video` or `clinic`                     |
//! | `specialties` | comma-joined names, comma left unencoded |
//! | `sort`        | `fees` or `experience`                  |
//!
//! Parsing never fails: anything unknown or malformed falls back to the
//! field's default. Serialising omits fields at their default.

use std::borrow::Cow;
use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{ConsultType, QueryState, SortKey};

pub const SEARCH_PARAM: &str = "search";
pub const CONSULT_TYPE_PARAM: &str = "consultType";
pub const SPECIALTIES_PARAM: &str = "specialties";
pub const SORT_PARAM: &str = "sort";

const SPECIALTY_SEPARATOR: char = ',';

impl QueryState {
    /// Parse a location query string, with or without the leading `?`.
    ///
    /// When a parameter repeats, the last occurrence wins.
    pub fn from_query_string(query: &str) -> Self {
        let mut state = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(key) = decode_component(raw_key) else {
                debug!(param = raw_key, "ignoring undecodable location parameter");
                continue;
            };

            match key.as_str() {
                SEARCH_PARAM => {
                    state.search_text = decode_component(raw_value).unwrap_or_else(|| {
                        debug!(value = raw_value, "undecodable search text, using default");
                        String::new()
                    });
                }
                CONSULT_TYPE_PARAM => {
                    state.consult_type = decode_component(raw_value)
                        .and_then(|value| ConsultType::from_param(&value))
                        .unwrap_or_else(|| {
                            debug!(value = raw_value, "unknown consultType, using default");
                            ConsultType::None
                        });
                }
                SPECIALTIES_PARAM => {
                    state.specialties = parse_specialties(raw_value);
                }
                SORT_PARAM => {
                    state.sort_key = decode_component(raw_value)
                        .and_then(|value| SortKey::from_param(&value))
                        .unwrap_or_else(|| {
                            debug!(value = raw_value, "unknown sort key, using default");
                            SortKey::None
                        });
                }
                other => debug!(param = other, "ignoring unknown location parameter"),
            }
        }

        state
    }

    /// Serialise into a query string without the leading `?`.
    ///
    /// Parameters are always written in the same order, so equal states
    /// produce equal strings.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::with_capacity(4);

        if !self.search_text.is_empty() {
            pairs.push((SEARCH_PARAM, urlencoding::encode(&self.search_text)));
        }
        if let Some(consult_type) = self.consult_type.as_param() {
            pairs.push((CONSULT_TYPE_PARAM, Cow::Borrowed(consult_type)));
        }
        if !self.specialties.is_empty() {
            let joined = self
                .specialties
                .iter()
                .map(|name| urlencoding::encode(name))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push((SPECIALTIES_PARAM, Cow::Owned(joined)));
        }
        if let Some(sort_key) = self.sort_key.as_param() {
            pairs.push((SORT_PARAM, Cow::Borrowed(sort_key)));
        }

        pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Split on the unencoded separator first, then decode each name, so a comma
/// inside a name (`%2C`) survives. Blank names are dropped.
fn parse_specialties(raw: &str) -> BTreeSet<String> {
    raw.split(SPECIALTY_SEPARATOR)
        .filter_map(decode_component)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Form-urlencoded decoding: `+` is a space, `%XX` escapes must form UTF-8.
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}
