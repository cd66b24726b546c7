use std::collections::BTreeSet;

/// Consultation mode filter. Radio semantics: at most one mode is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsultType {
    #[default]
    None,
    Video,
    Clinic,
}

impl ConsultType {
    /// Value written to the `consultType` location parameter.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            ConsultType::None => None,
            ConsultType::Video => Some("video"),
            ConsultType::Clinic => Some("clinic"),
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ConsultType::Video),
            "clinic" => Some(ConsultType::Clinic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsultType::None => "Any",
            ConsultType::Video => "Video Consult",
            ConsultType::Clinic => "In Clinic",
        }
    }
}

/// Sort order for the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    None,
    /// Ascending by fee.
    Fees,
    /// Descending by years of experience.
    Experience,
}

impl SortKey {
    /// Value written to the `sort` location parameter.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortKey::None => None,
            SortKey::Fees => Some("fees"),
            SortKey::Experience => Some("experience"),
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::None => "Relevance",
            SortKey::Fees => "Fees (Low to High)",
            SortKey::Experience => "Experience (High to Low)",
        }
    }
}

/// The user's current search, filter and sort selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_text: String,
    pub consult_type: ConsultType,
    pub specialties: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl QueryState {
    /// True when a consult type, specialty or sort key is selected.
    ///
    /// Search text is not a filter here; "Clear All" leaves it alone.
    pub fn has_active_filters(&self) -> bool {
        self.consult_type != ConsultType::None
            || !self.specialties.is_empty()
            || self.sort_key != SortKey::None
    }

    /// Reset consult type, specialties and sort key. Search text is kept.
    pub fn clear_filters(&mut self) {
        self.consult_type = ConsultType::None;
        self.specialties.clear();
        self.sort_key = SortKey::None;
    }

    /// Add `name` if absent, remove it if present. Blank names are ignored.
    /// Returns whether the selection changed.
    pub fn toggle_specialty(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if !self.specialties.remove(name) {
            self.specialties.insert(name.to_string());
        }
        true
    }
}
