//! Debounced suggestion lookups for the live search input.
//!
//! Every keystroke cancels the pending lookup and schedules a new one after
//! the quiet period. Results are published on a `watch` channel and tagged
//! with a generation number, so a lookup that was superseded while already
//! running can never overwrite the state of a newer one.

use crate::core::suggest::suggest_names;
use crate::domain::model::Doctor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// Input the current suggestions were computed for.
    pub query: String,
    pub suggestions: Vec<String>,
    pub loading: bool,
    pub visible: bool,
    generation: u64,
}

impl SuggestionState {
    /// Suggestions to render: empty while the dropdown is hidden.
    pub fn shown(&self) -> &[String] {
        if self.visible {
            &self.suggestions
        } else {
            &[]
        }
    }
}

/// Holder for the live search input and its suggestion dropdown.
///
/// Must be driven from inside a tokio runtime. Dropping the box cancels any
/// pending lookup.
pub struct SuggestionBox {
    doctors: Arc<Vec<Doctor>>,
    delay: Duration,
    input: String,
    pending: Option<JoinHandle<()>>,
    state: Arc<watch::Sender<SuggestionState>>,
}

impl SuggestionBox {
    pub fn new(doctors: Arc<Vec<Doctor>>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());
        Self {
            doctors,
            delay,
            input: String::new(),
            pending: None,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    pub fn input_value(&self) -> &str {
        &self.input
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the record set and look up suggestions again for the current input.
    pub fn set_doctors(&mut self, doctors: Arc<Vec<Doctor>>) {
        self.doctors = doctors;
        let input = self.input.clone();
        self.input(input);
    }

    /// Record a keystroke. Supersedes any lookup that has not completed yet.
    pub fn input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.cancel_pending();

        if self.input.trim().is_empty() {
            self.state.send_modify(|s| {
                s.generation += 1;
                s.query.clear();
                s.suggestions.clear();
                s.loading = false;
                s.visible = false;
            });
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.loading = true;
            generation = s.generation;
        });

        let query = self.input.clone();
        let doctors = Arc::clone(&self.doctors);
        let state = Arc::clone(&self.state);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let suggestions = suggest_names(&query, &doctors);
            let count = suggestions.len();
            let applied = state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                s.query = query;
                s.suggestions = suggestions;
                s.loading = false;
                s.visible = true;
                true
            });

            if applied {
                tracing::debug!("Published {} suggestions", count);
            } else {
                tracing::debug!("Discarded superseded suggestion lookup");
            }
        }));
    }

    /// Set the input without a lookup, e.g. when it is restored or picked from the list.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.close();
    }

    /// Cancel any pending lookup and hide the dropdown.
    pub fn close(&mut self) {
        self.cancel_pending();
        self.state.send_modify(|s| {
            s.generation += 1;
            s.loading = false;
            s.visible = false;
        });
    }

    /// Hide the dropdown, e.g. on a click outside of it. A pending lookup still
    /// completes and re-opens it.
    pub fn dismiss(&self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.visible, false));
    }

    /// Re-open the dropdown on focus if there is something to show.
    pub fn focus(&self) {
        let has_input = !self.input.trim().is_empty();
        self.state.send_if_modified(|s| {
            let show = has_input && !s.suggestions.is_empty() && !s.visible;
            if show {
                s.visible = true;
            }
            show
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SuggestionBox {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ConsultationType;
    use tokio::time::Instant;

    fn doctors() -> Arc<Vec<Doctor>> {
        let doctor = |id: &str, name: &str| Doctor {
            id: id.to_string(),
            name: name.to_string(),
            specialty: "Pediatrician".to_string(),
            consultation_types: vec![ConsultationType::Online],
            experience: 4,
            rating: 4.2,
            review_count: 31,
            fees: 450.0,
            qualification: "MBBS, DCH".to_string(),
            image_url: String::new(),
            availability: vec!["Tue".to_string()],
            location: None,
        };
        Arc::new(vec![doctor("1", "Dr. Zara"), doctor("2", "Dr. Meena"), doctor("3", "Dr. Zoya")])
    }

    async fn settled(rx: &mut watch::Receiver<SuggestionState>) -> SuggestionState {
        loop {
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update().clone();
            if !state.loading {
                return state;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_input_is_looked_up() {
        let mut sbox = SuggestionBox::new(doctors(), DEFAULT_DEBOUNCE);
        let mut rx = sbox.subscribe();

        sbox.input("z");
        tokio::time::sleep(Duration::from_millis(100)).await;
        sbox.input("me");
        let typed_at = Instant::now();
        assert!(rx.borrow_and_update().loading);

        let state = settled(&mut rx).await;
        assert!(typed_at.elapsed() >= DEFAULT_DEBOUNCE);
        assert_eq!(state.query, "me");
        assert_eq!(state.suggestions, vec!["Dr. Meena"]);
        assert!(state.visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_clears_immediately() {
        let mut sbox = SuggestionBox::new(doctors(), DEFAULT_DEBOUNCE);
        let mut rx = sbox.subscribe();

        sbox.input("dr. z");
        let state = settled(&mut rx).await;
        assert_eq!(state.suggestions, vec!["Dr. Zara", "Dr. Zoya"]);

        sbox.input("  ");
        let state = sbox.snapshot();
        assert!(state.suggestions.is_empty());
        assert!(!state.visible);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_and_focus() {
        let mut sbox = SuggestionBox::new(doctors(), DEFAULT_DEBOUNCE);
        let mut rx = sbox.subscribe();

        sbox.input("zo");
        settled(&mut rx).await;

        sbox.dismiss();
        assert!(sbox.snapshot().shown().is_empty());

        sbox.focus();
        assert_eq!(sbox.snapshot().shown(), ["Dr. Zoya".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_lookup() {
        let mut sbox = SuggestionBox::new(doctors(), DEFAULT_DEBOUNCE);
        sbox.input("zara");
        sbox.close();

        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
        let state = sbox.snapshot();
        assert!(!state.loading);
        assert!(state.suggestions.is_empty());

        sbox.set_value("Dr. Zoya");
        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
        assert_eq!(sbox.input_value(), "Dr. Zoya");
        assert!(sbox.snapshot().suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_lookup() {
        let mut sbox = SuggestionBox::new(doctors(), DEFAULT_DEBOUNCE);
        sbox.input("dr");
        let mut rx = sbox.subscribe();

        drop(sbox);
        assert!(rx.changed().await.is_err());
        assert!(rx.borrow().suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_doctors_refresh_current_input() {
        let mut sbox = SuggestionBox::new(Arc::new(Vec::new()), DEFAULT_DEBOUNCE);
        let mut rx = sbox.subscribe();

        sbox.input("meena");
        assert!(settled(&mut rx).await.suggestions.is_empty());

        sbox.set_doctors(doctors());
        assert_eq!(settled(&mut rx).await.suggestions, vec!["Dr. Meena"]);
    }
}
