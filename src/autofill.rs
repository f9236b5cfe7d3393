//! Debounced ballot-entry auto-fill
//!
//! When the operator selects a ballot entry, its fields are adopted into the
//! search form only after a short delay, and an automatic search fires after
//! a second delay. Any manual edit in between wins: it bumps a generation
//! counter that stale timers check before acting. In-flight store requests
//! are never killed; a superseded timer simply does nothing when it wakes.

use crate::query::{BallotEntry, SearchForm};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Delay before an offered ballot entry is adopted into the form
pub const ADOPT_DELAY: Duration = Duration::from_millis(500);
/// Delay between adoption and the automatic search
pub const SEARCH_DELAY: Duration = Duration::from_millis(500);

/// Minimum trimmed length of a printed name worth auto-filling
const MIN_NAME_LEN: usize = 2;

struct State {
    generation: u64,
    form: SearchForm,
}

/// Shared auto-fill coordinator; clone freely, all clones see one state
#[derive(Clone)]
pub struct FormAutoFill {
    inner: Arc<Mutex<State>>,
}

impl Default for FormAutoFill {
    fn default() -> Self {
        Self::new()
    }
}

impl FormAutoFill {
    pub fn new() -> Self {
        FormAutoFill {
            inner: Arc::new(Mutex::new(State {
                generation: 0,
                form: SearchForm::default(),
            })),
        }
    }

    /// Record a manual edit. Bumps the generation, so every timer armed
    /// before this call is disarmed.
    pub async fn user_edit(&self, form: SearchForm) {
        let mut state = self.inner.lock().await;
        state.generation += 1;
        state.form = form;
    }

    /// The form as it currently stands
    pub async fn current_form(&self) -> SearchForm {
        self.inner.lock().await.form.clone()
    }

    /// Offer a ballot entry for adoption
    ///
    /// Returns the adopted form after `ADOPT_DELAY`, or `None` when the
    /// entry is too short to be useful or the operator edited the form
    /// while the timer was pending.
    pub async fn offer(&self, entry: &BallotEntry) -> Option<SearchForm> {
        if entry.name_printed.trim().chars().count() < MIN_NAME_LEN {
            debug!("Ballot entry name too short, not auto-filling");
            return None;
        }

        let armed_at = self.inner.lock().await.generation;
        tokio::time::sleep(ADOPT_DELAY).await;

        let mut state = self.inner.lock().await;
        if state.generation != armed_at {
            debug!("Auto-fill superseded by a manual edit");
            return None;
        }

        state.form = SearchForm::from_ballot_entry(entry);
        Some(state.form.clone())
    }

    /// Gate for the automatic search that follows adoption
    ///
    /// Waits `SEARCH_DELAY`, then returns the form to search with, unless
    /// the operator edited the form in the meantime.
    pub async fn auto_search_gate(&self) -> Option<SearchForm> {
        let armed_at = self.inner.lock().await.generation;
        tokio::time::sleep(SEARCH_DELAY).await;

        let state = self.inner.lock().await;
        if state.generation != armed_at {
            debug!("Automatic search superseded by a manual edit");
            return None;
        }
        Some(state.form.clone())
    }
}
