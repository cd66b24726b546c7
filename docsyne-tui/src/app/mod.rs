use doctor_directory::{
    ConsultType, DirectorySession, DoctorRecord, FetchFailure, FilterChip, LoadState,
    MemoryLocation, SortKey,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

mod state;
pub use state::{Focus, TextInput};

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub focus: Focus,
    /// The directory view; owns the address bar location.
    pub session: DirectorySession<MemoryLocation>,

    // Search bar and its suggestion dropdown
    pub search_input: TextInput,
    pub suggestion_index: Option<usize>,

    // Specialty list, optionally narrowed by a fuzzy filter
    pub specialty_filter: Option<TextInput>,
    pub specialty_rows: Vec<String>,
    pub specialty_index: usize,

    pub chip_index: usize,

    pub results_index: usize,
    pub results_view_height: usize, // Last-rendered inner height (updated by renderer each frame)

    pub source_label: String,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(location: MemoryLocation, source_label: impl Into<String>) -> Self {
        let session = DirectorySession::open(location);
        let search_input = TextInput::with_value(&session.query().search_text);
        let specialty_rows = session.available_specialties();

        Self {
            running: true,
            status_message: None,
            focus: Focus::Search,
            session,
            search_input,
            suggestion_index: None,
            specialty_filter: None,
            specialty_rows,
            specialty_index: 0,
            chip_index: 0,
            results_index: 0,
            results_view_height: 0,
            source_label: source_label.into(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.session.load_state(), LoadState::Loading)
    }

    /// Address bar text.
    pub fn href(&self) -> String {
        self.session.location().href()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.suggestion_index = None;
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.suggestion_index = None;
    }

    // Search bar

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.sync_search_text();
    }

    pub fn search_input_backspace(&mut self) {
        self.search_input.backspace();
        self.sync_search_text();
    }

    pub fn search_input_clear(&mut self) {
        self.search_input.clear();
        self.sync_search_text();
    }

    pub fn search_move_cursor(&mut self, left: bool) {
        if left {
            self.search_input.move_left();
        } else {
            self.search_input.move_right();
        }
    }

    pub fn search_cursor_home_end(&mut self, home: bool) {
        if home {
            self.search_input.home();
        } else {
            self.search_input.end();
        }
    }

    fn sync_search_text(&mut self) {
        self.session.set_search_text(self.search_input.value.clone());
        self.suggestion_index = None;
        self.after_query_change();
    }

    pub fn suggestions_visible(&self) -> bool {
        self.focus == Focus::Search && !self.session.suggestions().is_empty()
    }

    pub fn suggestion_next(&mut self) {
        let len = self.session.suggestions().len();
        if len == 0 {
            return;
        }
        self.suggestion_index = Some(match self.suggestion_index {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn suggestion_previous(&mut self) {
        let len = self.session.suggestions().len();
        if len == 0 {
            return;
        }
        self.suggestion_index = Some(match self.suggestion_index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Apply the highlighted suggestion. Returns false when none is highlighted.
    pub fn confirm_suggestion(&mut self) -> bool {
        let Some(index) = self.suggestion_index else {
            return false;
        };
        if !self.session.pick_suggestion(index) {
            return false;
        }
        self.search_input = TextInput::with_value(&self.session.query().search_text);
        self.suggestion_index = None;
        self.after_query_change();
        self.set_status(format!("Showing {}", self.search_input.value));
        true
    }

    pub fn dismiss_suggestions(&mut self) {
        self.session.dismiss_suggestions();
        self.suggestion_index = None;
    }

    // Filter panel

    pub fn set_consult_type(&mut self, consult_type: ConsultType) {
        self.session.set_consult_type(consult_type);
        self.after_query_change();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.session.set_sort_key(sort_key);
        self.after_query_change();
    }

    pub fn clear_all(&mut self) {
        if !self.session.query().has_active_filters() {
            self.set_status("No filters to clear".to_string());
            return;
        }
        self.session.clear_all();
        self.after_query_change();
        self.set_status("Filters cleared".to_string());
    }

    pub fn specialty_next(&mut self) {
        if self.specialty_index + 1 < self.specialty_rows.len() {
            self.specialty_index += 1;
        }
    }

    pub fn specialty_previous(&mut self) {
        self.specialty_index = self.specialty_index.saturating_sub(1);
    }

    pub fn focused_specialty(&self) -> Option<&str> {
        self.specialty_rows
            .get(self.specialty_index)
            .map(String::as_str)
    }

    pub fn toggle_focused_specialty(&mut self) {
        let Some(name) = self.focused_specialty().map(str::to_string) else {
            return;
        };
        self.session.toggle_specialty(&name);
        self.after_query_change();
    }

    pub fn is_specialty_selected(&self, name: &str) -> bool {
        self.session.query().specialties.contains(name)
    }

    pub fn open_specialty_filter(&mut self) {
        self.focus = Focus::Filters;
        if self.specialty_filter.is_none() {
            self.specialty_filter = Some(TextInput::new());
        }
    }

    pub fn close_specialty_filter(&mut self) {
        self.specialty_filter = None;
        self.refresh_specialty_rows();
    }

    pub fn specialty_filter_char(&mut self, c: char) {
        if let Some(input) = self.specialty_filter.as_mut() {
            input.insert(c);
            self.specialty_index = 0;
            self.refresh_specialty_rows();
        }
    }

    pub fn specialty_filter_backspace(&mut self) {
        if let Some(input) = self.specialty_filter.as_mut() {
            input.backspace();
            self.specialty_index = 0;
            self.refresh_specialty_rows();
        }
    }

    /// Rebuild the specialty list, fuzzy-narrowed and best match first while
    /// a filter is typed.
    fn refresh_specialty_rows(&mut self) {
        let all = self.session.available_specialties();
        let needle = self
            .specialty_filter
            .as_ref()
            .map(|input| input.value.as_str())
            .unwrap_or_default();

        self.specialty_rows = if needle.is_empty() {
            all
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(String, i64)> = all
                .into_iter()
                .filter_map(|name| {
                    matcher
                        .fuzzy_match(&name, needle)
                        .map(|score| (name, score))
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored.into_iter().map(|(name, _)| name).collect()
        };

        if self.specialty_index >= self.specialty_rows.len() {
            self.specialty_index = self.specialty_rows.len().saturating_sub(1);
        }
    }

    // Chip row

    pub fn chip_next(&mut self) {
        if self.chip_index + 1 < self.session.active_chips().len() {
            self.chip_index += 1;
        }
    }

    pub fn chip_previous(&mut self) {
        self.chip_index = self.chip_index.saturating_sub(1);
    }

    pub fn remove_focused_chip(&mut self) {
        let chips = self.session.active_chips();
        let Some(chip) = chips.get(self.chip_index) else {
            return;
        };
        self.session.remove_filter_chip(chip);
        if let FilterChip::Search(_) = chip {
            self.search_input.clear();
        }
        self.set_status(format!("Removed {}", chip.label()));
        self.after_query_change();
    }

    // Results

    pub fn results_next(&mut self) {
        if self.results_index + 1 < self.session.visible().len() {
            self.results_index += 1;
        }
    }

    pub fn results_previous(&mut self) {
        self.results_index = self.results_index.saturating_sub(1);
    }

    pub fn results_page_down(&mut self) {
        let step = self.results_view_height.max(1);
        let last = self.session.visible().len().saturating_sub(1);
        self.results_index = (self.results_index + step).min(last);
    }

    pub fn results_page_up(&mut self) {
        let step = self.results_view_height.max(1);
        self.results_index = self.results_index.saturating_sub(step);
    }

    pub fn focused_doctor(&self) -> Option<&DoctorRecord> {
        self.session.visible().get(self.results_index)
    }

    // Loading

    pub fn apply_load_result(&mut self, result: Result<Vec<DoctorRecord>, FetchFailure>) {
        match result {
            Ok(doctors) => {
                self.session.load_records(doctors);
                self.set_status(format!("Loaded {} doctors", self.session.store().len()));
            }
            Err(failure) => {
                self.session
                    .load_failed(failure.error.to_string(), failure.attempts);
                self.set_status("Could not load doctors. Press r to retry".to_string());
            }
        }
        self.after_query_change();
    }

    /// Accept a retry only after a failed load.
    pub fn begin_retry(&mut self) -> bool {
        if self.session.begin_retry() {
            self.set_status("Retrying...".to_string());
            true
        } else {
            false
        }
    }

    fn after_query_change(&mut self) {
        self.results_index = 0;
        let chip_count = self.session.active_chips().len();
        if self.chip_index >= chip_count {
            self.chip_index = chip_count.saturating_sub(1);
        }
        self.refresh_specialty_rows();
    }
}
