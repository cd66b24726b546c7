use std::collections::HashSet;

use crate::domain::DoctorRecord;
use crate::engine::name_contains;

/// Most suggestions shown under the search bar.
pub const MAX_SUGGESTIONS: usize = 3;

/// An autocomplete entry for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
}

/// Name-match suggestions for a partially typed search.
///
/// Returns the first [`MAX_SUGGESTIONS`] doctors, in store order, whose name
/// contains `partial` case-insensitively. Empty input gives no suggestions;
/// whitespace is matched like any other character.
pub fn suggest(records: &[DoctorRecord], partial: &str) -> Vec<Suggestion> {
    let needle = partial.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|doctor| name_contains(doctor, &needle))
        .filter(|doctor| seen.insert(doctor.id.as_str()))
        .take(MAX_SUGGESTIONS)
        .map(|doctor| Suggestion {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        })
        .collect()
}
