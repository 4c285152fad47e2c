use crate::config::DirectoryConfig;
use crate::core::controller::{LoadState, PageController};
use crate::core::debounce::{SuggestionBox, SuggestionState};
use crate::domain::ports::DoctorSource;
use tokio::sync::watch;

/// One page load of the directory: the listing controller plus the search box
/// that feeds it.
pub struct DirectorySession {
    controller: PageController,
    search_box: SuggestionBox,
}

impl DirectorySession {
    /// Restore the view from `query`, then fetch the doctor list once.
    pub async fn open<S: DoctorSource + ?Sized>(
        source: &S,
        config: &DirectoryConfig,
        query: &str,
    ) -> Self {
        let mut controller = PageController::from_query(query, config.per_page());
        let mut search_box = SuggestionBox::new(controller.doctors(), config.debounce());

        tracing::info!("Loading doctors");
        controller.load(source).await;
        if controller.state() == &LoadState::Ready {
            search_box.set_doctors(controller.doctors());
        }

        let initial_search = controller.search_input().to_string();
        if !initial_search.is_empty() {
            search_box.set_value(initial_search);
        }

        Self {
            controller,
            search_box,
        }
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PageController {
        &mut self.controller
    }

    pub fn suggestions(&self) -> SuggestionState {
        self.search_box.snapshot()
    }

    pub fn watch_suggestions(&self) -> watch::Receiver<SuggestionState> {
        self.search_box.subscribe()
    }

    /// A keystroke in the search box: updates the live input and schedules a lookup.
    pub fn type_search(&mut self, value: &str) {
        self.controller.set_search_input(value);
        self.search_box.input(value);
    }

    /// Enter pressed: filter by the live input and close the dropdown.
    pub fn submit_search(&mut self) {
        self.controller.submit_search();
        self.search_box.close();
    }

    pub fn pick_suggestion(&mut self, name: &str) {
        self.search_box.set_value(name);
        self.controller.select_suggestion(name);
    }

    /// Click outside the search box.
    pub fn dismiss_suggestions(&self) {
        self.search_box.dismiss();
    }

    pub fn clear_filters(&mut self) {
        self.controller.clear_filters();
        self.search_box.input("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ConsultationType, Doctor};
    use crate::utils::error::Result;
    use async_trait::async_trait;

    struct StaticSource(Vec<Doctor>);

    #[async_trait]
    impl DoctorSource for StaticSource {
        async fn fetch_doctors(&self) -> Result<Vec<Doctor>> {
            Ok(self.0.clone())
        }
    }

    fn source() -> StaticSource {
        let doctor = |id: &str, name: &str, specialty: &str| Doctor {
            id: id.to_string(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            consultation_types: vec![ConsultationType::Online, ConsultationType::InPerson],
            experience: 9,
            rating: 4.6,
            review_count: 88,
            fees: 650.0,
            qualification: "MBBS, MS".to_string(),
            image_url: String::new(),
            availability: vec!["Sat".to_string()],
            location: Some("Pune".to_string()),
        };
        StaticSource(vec![
            doctor("1", "Dr. Priya Nair", "Orthopedic"),
            doctor("2", "Dr. Priyanka Das", "Gynecologist"),
            doctor("3", "Dr. Rahul Mehta", "Urologist"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_suggests_without_filtering() {
        let mut session = DirectorySession::open(&source(), &DirectoryConfig::default(), "").await;
        let mut rx = session.watch_suggestions();

        session.type_search("priy");
        assert_eq!(session.controller().total_count(), 3);

        rx.changed().await.unwrap();
        while rx.borrow_and_update().loading {
            rx.changed().await.unwrap();
        }
        assert_eq!(
            session.suggestions().shown(),
            ["Dr. Priya Nair".to_string(), "Dr. Priyanka Das".to_string()]
        );

        session.pick_suggestion("Dr. Priyanka Das");
        assert_eq!(session.controller().total_count(), 1);
        assert!(session.suggestions().shown().is_empty());
        assert_eq!(session.controller().query_string(), "page=1&search=Dr.+Priyanka+Das");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_and_clear() {
        let mut session =
            DirectorySession::open(&source(), &DirectoryConfig::default(), "page=1&search=rahul").await;
        assert_eq!(session.controller().search_input(), "rahul");
        assert_eq!(session.controller().total_count(), 1);

        session.type_search("dr.");
        session.submit_search();
        assert_eq!(session.controller().total_count(), 3);

        session.clear_filters();
        assert_eq!(session.controller().search_input(), "");
        assert!(session.suggestions().suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restored_search_keeps_dropdown_closed() {
        let session =
            DirectorySession::open(&source(), &DirectoryConfig::default(), "search=rahul").await;

        tokio::time::sleep(std::time::Duration::from_millis(600)).await;
        let state = session.suggestions();
        assert!(state.shown().is_empty());
        assert!(!state.loading);
        assert_eq!(session.controller().total_count(), 1);
    }
}
