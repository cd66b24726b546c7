use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::domain::{ConsultType, DoctorRecord, QueryState, SortKey};

/// Compute the visible list for `query` over the full `records` list.
///
/// Search, consult type and specialty filters are applied in that order,
/// then the sort. With no sort key the input order is kept; both sorts are
/// stable, so ties keep their input order too.
pub fn derive(records: &[DoctorRecord], query: &QueryState) -> Vec<DoctorRecord> {
    let needle = query.search_text.to_lowercase();

    let mut visible: Vec<DoctorRecord> = records
        .iter()
        .filter(|doctor| matches_search(doctor, &needle))
        .filter(|doctor| matches_consult_type(doctor, query.consult_type))
        .filter(|doctor| matches_specialties(doctor, &query.specialties))
        .cloned()
        .collect();

    sort_records(&mut visible, query.sort_key);
    visible
}

/// `needle` must already be lowercased.
pub(crate) fn name_contains(doctor: &DoctorRecord, needle: &str) -> bool {
    doctor.name.to_lowercase().contains(needle)
}

fn matches_search(doctor: &DoctorRecord, needle: &str) -> bool {
    needle.is_empty() || name_contains(doctor, needle)
}

fn matches_consult_type(doctor: &DoctorRecord, consult_type: ConsultType) -> bool {
    match consult_type {
        ConsultType::None => true,
        ConsultType::Video => doctor.video_consult,
        ConsultType::Clinic => doctor.in_clinic,
    }
}

fn matches_specialties(doctor: &DoctorRecord, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || doctor.has_any_speciality(selected)
}

fn sort_records(records: &mut [DoctorRecord], sort_key: SortKey) {
    match sort_key {
        SortKey::None => {}
        SortKey::Fees => records.sort_by_key(DoctorRecord::fee_magnitude),
        SortKey::Experience => records.sort_by_key(|doctor| Reverse(doctor.experience_magnitude())),
    }
}
