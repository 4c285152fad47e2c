//! Page controller: owns the doctor list and the filter state, and keeps the
//! visible page and the shareable query string in sync with both.

use crate::core::query::filter_and_sort;
use crate::core::url_state;
use crate::domain::model::{ConsultationType, Doctor, FilterSpec, PageResult, SortBy};
use crate::domain::ports::DoctorSource;
use crate::utils::error::FETCH_FAILURE_MESSAGE;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error(String),
}

pub struct PageController {
    state: LoadState,
    doctors: Arc<Vec<Doctor>>,
    spec: FilterSpec,
    search_input: String,
    visible: PageResult,
    query_string: String,
}

impl PageController {
    pub fn new(per_page: usize) -> Self {
        Self::with_spec(FilterSpec::new(per_page))
    }

    /// Restore the view encoded in a query string, e.g. from a bookmark.
    pub fn from_query(query: &str, per_page: usize) -> Self {
        Self::with_spec(url_state::from_query_string(query, per_page))
    }

    fn with_spec(spec: FilterSpec) -> Self {
        let search_input = spec.search.clone();
        let mut controller = Self {
            state: LoadState::Loading,
            doctors: Arc::new(Vec::new()),
            spec,
            search_input,
            visible: PageResult::default(),
            query_string: String::new(),
        };
        controller.refresh();
        controller
    }

    /// Fetch the doctor list once. A failure is terminal for this controller.
    pub async fn load<S: DoctorSource + ?Sized>(&mut self, source: &S) -> &LoadState {
        if self.state != LoadState::Loading {
            tracing::warn!("Doctor list already loaded, ignoring reload request");
            return &self.state;
        }

        match source.fetch_doctors().await {
            Ok(doctors) => {
                tracing::info!("Loaded {} doctors", doctors.len());
                self.doctors = Arc::new(doctors);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!("Error fetching doctors: {}", e);
                tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                self.state = LoadState::Error(FETCH_FAILURE_MESSAGE.to_string());
            }
        }

        self.refresh();
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Shared handle to the full record set, for the suggestion box.
    pub fn doctors(&self) -> Arc<Vec<Doctor>> {
        Arc::clone(&self.doctors)
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Update the live search text. Filtering is unaffected until submitted.
    pub fn set_search_input(&mut self, value: impl Into<String>) {
        self.search_input = value.into();
    }

    pub fn submit_search(&mut self) {
        self.spec.search = self.search_input.clone();
        self.filters_changed();
    }

    pub fn select_suggestion(&mut self, name: impl Into<String>) {
        self.search_input = name.into();
        self.submit_search();
    }

    pub fn set_consultation_type(&mut self, consultation_type: Option<ConsultationType>) {
        self.spec.consultation_type = consultation_type;
        self.filters_changed();
    }

    pub fn toggle_specialty(&mut self, specialty: &str) {
        if let Some(pos) = self.spec.specialties.iter().position(|s| s == specialty) {
            self.spec.specialties.remove(pos);
        } else {
            self.spec.specialties.push(specialty.to_string());
        }
        self.filters_changed();
    }

    pub fn set_specialties(&mut self, specialties: Vec<String>) {
        self.spec.specialties = specialties;
        self.filters_changed();
    }

    pub fn clear_specialties(&mut self) {
        self.set_specialties(Vec::new());
    }

    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.spec.sort_by = sort_by;
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.spec.clear_filters();
        self.search_input.clear();
        self.refresh();
    }

    /// Jump to `page` without touching the filters. Page 0 is treated as 1.
    pub fn go_to_page(&mut self, page: usize) {
        self.spec.page = page.max(1);
        self.refresh();
    }

    pub fn page(&self) -> usize {
        self.spec.page
    }

    pub fn per_page(&self) -> usize {
        self.spec.per_page
    }

    pub fn visible_doctors(&self) -> &[Doctor] {
        &self.visible.doctors
    }

    pub fn total_count(&self) -> usize {
        self.visible.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.visible.total_count.div_ceil(self.spec.per_page)
    }

    /// 1-based, inclusive positions of the visible doctors within all matches.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.visible.doctors.is_empty() {
            return None;
        }
        let first = (self.spec.page - 1) * self.spec.per_page + 1;
        Some((first, first + self.visible.doctors.len() - 1))
    }

    /// Number of active filters, not counting the search text.
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.spec.consultation_type.is_some())
            + self.spec.specialties.len()
            + usize::from(!self.spec.sort_by.is_none())
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    fn filters_changed(&mut self) {
        self.spec.page = 1;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = filter_and_sort(&self.doctors, &self.spec);
        self.query_string = url_state::to_query_string(&self.spec);
        tracing::debug!("View updated: ?{}", self.query_string);
    }
}
