use tracing::{debug, error, info, warn};

use crate::domain::{ConsultType, DoctorRecord, QueryState, SortKey, SPECIALTY_CATALOGUE};
use crate::engine::derive;
use crate::location::QueryLocation;
use crate::store::{LoadState, RecordStore};
use crate::suggest::{suggest, Suggestion};

/// One active filter, as shown in the removable chip row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterChip {
    Search(String),
    ConsultType(ConsultType),
    Specialty(String),
    Sort(SortKey),
}

impl FilterChip {
    pub fn label(&self) -> String {
        match self {
            FilterChip::Search(text) => format!("\"{}\"", text),
            FilterChip::ConsultType(consult_type) => consult_type.label().to_string(),
            FilterChip::Specialty(name) => name.clone(),
            FilterChip::Sort(sort_key) => format!("Sort: {}", sort_key.label()),
        }
    }
}

/// A directory page view: the record store, the query state and the derived
/// list, kept consistent with the page location.
///
/// Every mutating method is one atomic step: update the query, recompute the
/// visible list, then write the location once with the final query.
pub struct DirectorySession<L: QueryLocation> {
    location: L,
    store: RecordStore,
    query: QueryState,
    visible: Vec<DoctorRecord>,
    suggestions: Vec<Suggestion>,
    suggestions_open: bool,
}

impl<L: QueryLocation> DirectorySession<L> {
    /// Start a view from the location's current query. The store starts
    /// empty and loading; the location is not written until the first change.
    pub fn open(location: L) -> Self {
        let query = QueryState::from_query_string(&location.current_query());
        let store = RecordStore::new();
        let visible = derive(store.records(), &query);
        debug!(?query, "directory session opened");

        Self {
            location,
            store,
            query,
            visible,
            suggestions: Vec::new(),
            suggestions_open: false,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn visible(&self) -> &[DoctorRecord] {
        &self.visible
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn load_state(&self) -> &LoadState {
        self.store.load_state()
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query.search_text {
            return;
        }
        self.query.search_text = text;
        self.suggestions_open = !self.query.search_text.is_empty();
        self.refresh_suggestions();
        self.commit();
    }

    /// Select a consultation mode. Selecting the current mode again is a no-op.
    pub fn set_consult_type(&mut self, consult_type: ConsultType) {
        if self.query.consult_type == consult_type {
            return;
        }
        self.query.consult_type = consult_type;
        self.commit();
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        if self.query.toggle_specialty(name) {
            self.commit();
        }
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        if self.query.sort_key == sort_key {
            return;
        }
        self.query.sort_key = sort_key;
        self.commit();
    }

    /// Reset consult type, specialties and sort key in one step. The search
    /// text is left as is.
    pub fn clear_all(&mut self) {
        if !self.query.has_active_filters() {
            return;
        }
        self.query.clear_filters();
        self.commit();
    }

    /// Remove one active filter. Removing a filter that is not active does
    /// nothing.
    pub fn remove_filter_chip(&mut self, chip: &FilterChip) {
        match chip {
            FilterChip::Search(text) => {
                if self.query.search_text == *text {
                    self.set_search_text("");
                }
            }
            FilterChip::ConsultType(consult_type) => {
                if self.query.consult_type == *consult_type {
                    self.set_consult_type(ConsultType::None);
                }
            }
            FilterChip::Specialty(name) => {
                if self.query.specialties.contains(name) {
                    self.toggle_specialty(name);
                }
            }
            FilterChip::Sort(sort_key) => {
                if self.query.sort_key == *sort_key {
                    self.set_sort_key(SortKey::None);
                }
            }
        }
    }

    /// Apply the suggestion at `index`: the search text becomes the doctor's
    /// full name and the suggestion list closes. Nothing else changes.
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        let Some(picked) = self.suggestions.get(index).cloned() else {
            return false;
        };
        self.query.search_text = picked.name;
        self.dismiss_suggestions();
        self.commit();
        true
    }

    pub fn dismiss_suggestions(&mut self) {
        self.suggestions_open = false;
        self.suggestions.clear();
    }

    /// Chips for every active filter, in panel order.
    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if !self.query.search_text.is_empty() {
            chips.push(FilterChip::Search(self.query.search_text.clone()));
        }
        if self.query.consult_type != ConsultType::None {
            chips.push(FilterChip::ConsultType(self.query.consult_type));
        }
        chips.extend(self.query.specialties.iter().cloned().map(FilterChip::Specialty));
        if self.query.sort_key != SortKey::None {
            chips.push(FilterChip::Sort(self.query.sort_key));
        }
        chips
    }

    /// Specialties the filter panel offers: the fixed catalogue, then any
    /// other specialty found in the store or selected through the location.
    pub fn available_specialties(&self) -> Vec<String> {
        let mut names: Vec<String> = SPECIALTY_CATALOGUE.iter().map(|s| s.to_string()).collect();
        let extra = self
            .store
            .speciality_names()
            .into_iter()
            .map(str::to_string)
            .chain(self.query.specialties.iter().cloned());
        for name in extra {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Fetch completed: fill the store and re-derive.
    pub fn load_records(&mut self, records: Vec<DoctorRecord>) {
        match self.store.populate(records) {
            Ok(dropped) => {
                info!(count = self.store.len(), dropped, "doctor listing loaded");
            }
            Err(e) => {
                warn!("ignoring doctor listing: {}", e);
                return;
            }
        }
        if self.suggestions_open {
            self.refresh_suggestions();
        }
        self.commit();
    }

    /// Fetch gave up: record the failure so it can be shown with a retry.
    pub fn load_failed(&mut self, message: impl Into<String>, attempts: u32) {
        let message = message.into();
        error!(attempts, "doctor listing failed to load: {}", message);
        self.store.mark_failed(message, attempts);
        self.commit();
    }

    /// Put a failed load back into the loading state before a retry.
    /// Returns false unless the previous load failed.
    pub fn begin_retry(&mut self) -> bool {
        self.store.mark_loading()
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = if self.suggestions_open {
            suggest(self.store.records(), &self.query.search_text)
        } else {
            Vec::new()
        };
    }

    fn commit(&mut self) {
        self.visible = derive(self.store.records(), &self.query);

        let serialized = self.query.to_query_string();
        if serialized != self.location.current_query() {
            self.location.replace_query(&serialized);
        }
        debug!(
            visible = self.visible.len(),
            query = %serialized,
            "directory view committed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{MemoryLocation, FIND_DOCTOR_PATH};

    fn records() -> Vec<DoctorRecord> {
        vec![
            DoctorRecord::new("1", "Dr. Anita Sharma")
                .with_specialities(["Dentist", "ENT"])
                .with_modes(true, false)
                .with_fees("₹ 500")
                .with_experience("8 Years of experience"),
            DoctorRecord::new("2", "Dr. Vikram Rao")
                .with_specialities(["Cardiologist"])
                .with_modes(false, true)
                .with_fees("₹ 300")
                .with_experience("20 Years of experience"),
            DoctorRecord::new("3", "Dr. Anand Kumar")
                .with_specialities(["General Physician"])
                .with_modes(true, true)
                .with_fees("₹ 250")
                .with_experience("3 Years of experience"),
            DoctorRecord::new("4", "Dr. Shanti Iyer")
                .with_specialities(["Homeopath", "Reiki"])
                .with_modes(false, true)
                .with_fees("₹ 150")
                .with_experience("11 Years of experience"),
        ]
    }

    fn session_at(query: &str) -> DirectorySession<MemoryLocation> {
        DirectorySession::open(MemoryLocation::with_query(FIND_DOCTOR_PATH, query))
    }

    fn loaded_session() -> DirectorySession<MemoryLocation> {
        let mut session = session_at("");
        session.load_records(records());
        session
    }

    fn visible_names<L: QueryLocation>(session: &DirectorySession<L>) -> Vec<&str> {
        session.visible().iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn open_reads_query_without_writing_location() {
        let session = session_at("consultType=clinic&specialties=ENT,&sort=fees&utm=x");

        assert_eq!(session.query().consult_type, ConsultType::Clinic);
        assert_eq!(session.query().sort_key, SortKey::Fees);
        assert_eq!(session.query().specialties.len(), 1);
        assert!(session.visible().is_empty());
        assert_eq!(session.load_state(), &LoadState::Loading);
        assert_eq!(session.location().writes(), 0);
    }

    #[test]
    fn loading_records_derives_and_canonicalizes_location() {
        let mut session = session_at("sort=fees&utm=x&consultType=clinic");
        session.load_records(records());

        assert_eq!(
            visible_names(&session),
            vec!["Dr. Shanti Iyer", "Dr. Anand Kumar", "Dr. Vikram Rao"]
        );
        assert_eq!(session.location().query(), "consultType=clinic&sort=fees");
        assert_eq!(session.location().writes(), 1);
    }

    #[test]
    fn every_mutation_is_reflected_in_location() {
        let mut session = loaded_session();

        session.set_search_text("an");
        assert_eq!(session.location().query(), "search=an");

        session.set_consult_type(ConsultType::Video);
        session.toggle_specialty("ENT");
        session.set_sort_key(SortKey::Experience);

        assert_eq!(
            session.location().query(),
            "search=an&consultType=video&specialties=ENT&sort=experience"
        );
        assert_eq!(visible_names(&session), vec!["Dr. Anita Sharma"]);
        assert_eq!(session.location().writes(), 4);
    }

    #[test]
    fn set_consult_type_twice_is_idempotent() {
        let mut session = loaded_session();

        session.set_consult_type(ConsultType::Video);
        let once = session.query().clone();
        let writes = session.location().writes();

        session.set_consult_type(ConsultType::Video);

        assert_eq!(session.query(), &once);
        assert_eq!(session.location().writes(), writes);
    }

    #[test]
    fn clear_all_resets_filters_in_one_write_and_keeps_search() {
        let mut session = loaded_session();
        session.set_search_text("Dr");
        session.set_consult_type(ConsultType::Clinic);
        session.toggle_specialty("Cardiologist");
        session.set_sort_key(SortKey::Fees);
        let writes = session.location().writes();

        session.clear_all();

        let query = session.query();
        assert_eq!(query.consult_type, ConsultType::None);
        assert!(query.specialties.is_empty());
        assert_eq!(query.sort_key, SortKey::None);
        assert_eq!(query.search_text, "Dr");
        assert_eq!(session.location().writes(), writes + 1);
        assert_eq!(session.location().query(), "search=Dr");
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn clear_all_without_filters_does_nothing() {
        let mut session = loaded_session();
        let writes = session.location().writes();
        session.clear_all();
        assert_eq!(session.location().writes(), writes);
    }

    #[test]
    fn removing_chips_matches_individual_mutations() {
        let mut session = loaded_session();
        session.set_consult_type(ConsultType::Clinic);
        session.toggle_specialty("Cardiologist");
        session.toggle_specialty("Homeopath");
        session.set_sort_key(SortKey::Fees);

        assert_eq!(
            session.active_chips(),
            vec![
                FilterChip::ConsultType(ConsultType::Clinic),
                FilterChip::Specialty("Cardiologist".to_string()),
                FilterChip::Specialty("Homeopath".to_string()),
                FilterChip::Sort(SortKey::Fees),
            ]
        );

        session.remove_filter_chip(&FilterChip::Specialty("Cardiologist".to_string()));
        assert_eq!(visible_names(&session), vec!["Dr. Shanti Iyer"]);

        session.remove_filter_chip(&FilterChip::ConsultType(ConsultType::Clinic));
        session.remove_filter_chip(&FilterChip::Sort(SortKey::Fees));

        assert_eq!(session.location().query(), "specialties=Homeopath");
        assert_eq!(
            session.active_chips(),
            vec![FilterChip::Specialty("Homeopath".to_string())]
        );
    }

    #[test]
    fn removing_inactive_chip_is_a_no_op() {
        let mut session = loaded_session();
        session.set_sort_key(SortKey::Fees);
        let writes = session.location().writes();

        session.remove_filter_chip(&FilterChip::Sort(SortKey::Experience));
        session.remove_filter_chip(&FilterChip::Specialty("ENT".to_string()));
        session.remove_filter_chip(&FilterChip::ConsultType(ConsultType::Video));

        assert_eq!(session.query().sort_key, SortKey::Fees);
        assert!(session.query().specialties.is_empty());
        assert_eq!(session.location().writes(), writes);
    }

    #[test]
    fn suggestions_follow_search_text() {
        let mut session = loaded_session();

        session.set_search_text("an");
        let names: Vec<&str> = session.suggestions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dr. Anita Sharma", "Dr. Anand Kumar", "Dr. Shanti Iyer"]
        );

        session.set_search_text("");
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn trailing_space_narrows_search_and_suggestions() {
        let mut session = loaded_session();

        session.set_search_text("rao ");
        assert!(session.visible().is_empty());
        assert!(session.suggestions().is_empty());
        assert_eq!(session.location().query(), "search=rao%20");

        session.set_search_text(" ");
        assert_eq!(session.visible().len(), 4);
        assert_eq!(session.suggestions().len(), 3);
        assert_eq!(session.active_chips(), vec![FilterChip::Search(" ".to_string())]);
    }

    #[test]
    fn picking_a_suggestion_sets_full_name_and_closes_list() {
        let mut session = loaded_session();
        session.set_consult_type(ConsultType::Clinic);
        session.set_search_text("vik");

        assert!(session.pick_suggestion(0));

        assert_eq!(session.query().search_text, "Dr. Vikram Rao");
        assert!(session.suggestions().is_empty());
        assert_eq!(session.query().consult_type, ConsultType::Clinic);
        assert_eq!(visible_names(&session), vec!["Dr. Vikram Rao"]);
        assert_eq!(
            session.location().query(),
            "search=Dr.%20Vikram%20Rao&consultType=clinic"
        );
    }

    #[test]
    fn picking_out_of_range_suggestion_is_rejected() {
        let mut session = loaded_session();
        session.set_search_text("vik");
        assert!(!session.pick_suggestion(5));
        assert_eq!(session.query().search_text, "vik");
    }

    #[test]
    fn suggestions_typed_before_load_appear_when_records_arrive() {
        let mut session = session_at("");
        session.set_search_text("rao");
        assert!(session.suggestions().is_empty());

        session.load_records(records());

        assert_eq!(session.suggestions().len(), 1);
        assert_eq!(visible_names(&session), vec!["Dr. Vikram Rao"]);
    }

    #[test]
    fn search_from_location_does_not_open_suggestions() {
        let mut session = session_at("search=an");
        session.load_records(records());
        assert!(session.suggestions().is_empty());
        assert_eq!(session.visible().len(), 3);
    }

    #[test]
    fn failed_load_keeps_empty_view_and_allows_retry() {
        let mut session = session_at("sort=fees");
        session.load_failed("connection refused", 3);

        assert!(session.visible().is_empty());
        assert_eq!(
            session.load_state(),
            &LoadState::Failed {
                message: "connection refused".to_string(),
                attempts: 3
            }
        );

        assert!(session.begin_retry());
        assert!(!session.begin_retry());
        session.load_records(records());
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn second_load_is_ignored() {
        let mut session = loaded_session();
        session.load_records(vec![DoctorRecord::new("9", "Dr. Late")]);
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn available_specialties_extend_catalogue() {
        let mut session = session_at("specialties=Acupuncture");
        session.load_records(records());

        let available = session.available_specialties();
        assert_eq!(available.len(), SPECIALTY_CATALOGUE.len() + 2);
        assert_eq!(available[0], "General Physician");
        assert_eq!(available[SPECIALTY_CATALOGUE.len()], "Reiki");
        assert_eq!(available[SPECIALTY_CATALOGUE.len() + 1], "Acupuncture");
    }

    #[test]
    fn padded_listing_specialty_can_be_selected() {
        let listing: Vec<DoctorRecord> = serde_json::from_str(
            r#"[{"id": "9", "name": "Dr. Padded", "specialities": [{"name": " ENT"}]}]"#,
        )
        .unwrap();
        let mut session = session_at("");
        session.load_records(listing);

        let offered = session.available_specialties();
        assert_eq!(offered.iter().filter(|name| name.as_str() == "ENT").count(), 1);
        assert!(!offered.iter().any(|name| name.as_str() == " ENT"));

        session.toggle_specialty("ENT");
        assert_eq!(visible_names(&session), vec!["Dr. Padded"]);
    }

    fn assert_location_matches(session: &DirectorySession<MemoryLocation>) {
        let reparsed = QueryState::from_query_string(session.location().query());
        assert_eq!(&reparsed, session.query());
    }

    #[test]
    fn reachable_states_round_trip_through_location() {
        let mut session = loaded_session();

        session.set_search_text("Dr. A & B");
        assert_location_matches(&session);
        session.set_consult_type(ConsultType::Video);
        assert_location_matches(&session);
        session.toggle_specialty("Dietitian/Nutritionist");
        assert_location_matches(&session);
        session.toggle_specialty("General Physician");
        assert_location_matches(&session);
        session.set_sort_key(SortKey::Experience);
        assert_location_matches(&session);
        session.toggle_specialty("General Physician");
        assert_location_matches(&session);
        session.set_consult_type(ConsultType::Clinic);
        assert_location_matches(&session);
        session.clear_all();
        assert_location_matches(&session);
        session.set_search_text("");
        assert_location_matches(&session);
        assert_eq!(session.location().query(), "");
    }

    #[test]
    fn search_chip_clears_search_text() {
        let mut session = loaded_session();
        session.set_search_text("rao");
        session.set_sort_key(SortKey::Fees);

        assert_eq!(
            session.active_chips(),
            vec![
                FilterChip::Search("rao".to_string()),
                FilterChip::Sort(SortKey::Fees),
            ]
        );

        session.remove_filter_chip(&FilterChip::Search("rao".to_string()));

        assert_eq!(session.query().search_text, "");
        assert!(session.suggestions().is_empty());
        assert_eq!(session.location().query(), "sort=fees");
        assert_eq!(session.visible().len(), 4);
    }

    #[test]
    fn reopening_at_written_location_restores_view() {
        let mut session = loaded_session();
        session.set_consult_type(ConsultType::Clinic);
        session.set_sort_key(SortKey::Experience);

        let mut reopened = DirectorySession::open(session.location().clone());
        reopened.load_records(records());

        assert_eq!(reopened.query(), session.query());
        assert_eq!(reopened.visible(), session.visible());
    }
}
