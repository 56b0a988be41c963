//! Fetch lifecycle state for the dashboard view.

use chrono::{DateTime, Local};

use crate::csv::Row;

/// State container for the fetch/refresh lifecycle.
///
/// Owned by the top-level app rather than living in module-level globals;
/// every mutation goes through [`FetchState::begin`] and
/// [`FetchState::settle`].
#[derive(Debug, Default)]
pub struct FetchState {
    /// Parsed rows, replaced wholesale on each successful fetch.
    pub rows: Vec<Row>,
    /// True strictly while a fetch is in flight.
    pub is_loading: bool,
    /// Set on successful fetch completion, never cleared.
    pub last_updated: Option<DateTime<Local>>,
    /// Set on failure, cleared when the next fetch begins.
    pub error: Option<String>,
    /// Token of the most recently issued request. A settlement carrying an
    /// older token lost the race to a newer request and is dropped.
    current_token: u64,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch: clear any previous error, raise the loading flag and
    /// issue the token the settlement must present.
    pub fn begin(&mut self) -> u64 {
        self.error = None;
        self.is_loading = true;
        self.current_token += 1;
        self.current_token
    }

    /// Apply a settled fetch. Returns false when `token` is stale, i.e. a
    /// newer request was issued after this one started.
    ///
    /// On success `rows` is replaced and `last_updated` stamped; on failure
    /// `rows` is left untouched and only `error` is set.
    pub fn settle(&mut self, token: u64, result: Result<Vec<Row>, String>) -> bool {
        // Tokens start at 1, so 0 can never have been issued by begin().
        if token == 0 || token != self.current_token {
            tracing::debug!(
                token,
                current = self.current_token,
                "dropping stale fetch settlement"
            );
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.last_updated = Some(Local::now());
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: usize) -> Row {
        Row {
            id,
            subgroup: format!("g{id}"),
            team: format!("t{id}"),
            hbl: 10,
            unassigned: 2,
        }
    }

    #[test]
    fn new_state_is_empty_and_at_rest() {
        let state = FetchState::new();
        assert!(state.rows.is_empty());
        assert!(!state.is_loading);
        assert!(state.last_updated.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn begin_clears_error_and_sets_loading() {
        let mut state = FetchState::new();
        state.error = Some("previous failure".into());
        let token = state.begin();
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(token, 1);
    }

    #[test]
    fn successful_settle_replaces_rows_and_stamps_timestamp() {
        let mut state = FetchState::new();
        let token = state.begin();
        assert!(state.settle(token, Ok(vec![row(0), row(1)])));
        assert!(!state.is_loading);
        assert_eq!(state.rows.len(), 2);
        assert!(state.last_updated.is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn failed_settle_keeps_previous_rows() {
        let mut state = FetchState::new();
        let token = state.begin();
        state.settle(token, Ok(vec![row(0)]));

        let token = state.begin();
        assert!(state.settle(token, Err("GET: connection refused".into())));
        assert!(!state.is_loading);
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.error.as_deref(), Some("GET: connection refused"));
    }

    #[test]
    fn stale_settlement_is_dropped() {
        let mut state = FetchState::new();
        let first = state.begin();
        let second = state.begin();

        // The older request settles after the newer one was issued.
        assert!(!state.settle(first, Ok(vec![row(0)])));
        assert!(state.is_loading);
        assert!(state.rows.is_empty());

        assert!(state.settle(second, Ok(vec![row(0), row(1)])));
        assert_eq!(state.rows.len(), 2);
    }

    #[test]
    fn settlement_without_begin_is_dropped() {
        let mut state = FetchState::new();
        assert!(!state.settle(0, Ok(vec![row(0)])));
        assert!(state.rows.is_empty());
        assert!(!state.is_loading);
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn loading_is_true_only_between_begin_and_settle() {
        let mut state = FetchState::new();
        assert!(!state.is_loading);
        let token = state.begin();
        assert!(state.is_loading);
        state.settle(token, Err("boom".into()));
        assert!(!state.is_loading);
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut state = FetchState::new();
        let a = state.begin();
        let b = state.begin();
        let c = state.begin();
        assert!(a < b && b < c);
    }
}
