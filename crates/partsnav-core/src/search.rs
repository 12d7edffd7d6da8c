use std::time::Duration;

use tracing::debug;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);
pub const QUERY_CHAR_LIMIT: usize = 100;

/// A lookup the event loop should run once `delay` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub query: String,
    pub delay: Duration,
}

/// Live query text plus the result list last accepted for it.
///
/// Superseded lookups are never cancelled. Each one fires and its batch is
/// dropped on arrival unless it was tagged with the query currently typed.
#[derive(Debug, Clone)]
pub struct SearchCoordinator<R> {
    input: String,
    applied_query: Option<String>,
    results: Vec<R>,
    cursor: usize,
}

impl<R> Default for SearchCoordinator<R> {
    fn default() -> Self {
        Self {
            input: String::new(),
            applied_query: None,
            results: Vec::new(),
            cursor: 0,
        }
    }
}

impl<R> SearchCoordinator<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `query` already typed and its results in place.
    pub fn seeded(query: impl Into<String>, results: Vec<R>) -> Self {
        let query = query.into();
        Self {
            applied_query: Some(query.clone()),
            input: query,
            results,
            cursor: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Query whose batch is currently displayed, if any has been.
    pub fn applied_query(&self) -> Option<&str> {
        self.applied_query.as_deref()
    }

    /// Replaces the live input. Returns the lookup to schedule, or `None` when
    /// the text did not actually change.
    pub fn on_input_changed(&mut self, query: impl Into<String>) -> Option<PendingSearch> {
        let query: String = query.into().chars().take(QUERY_CHAR_LIMIT).collect();
        if query == self.input {
            return None;
        }

        self.input = query;
        debug!(query = %self.input, "search debounce scheduled");
        Some(PendingSearch {
            query: self.input.clone(),
            delay: SEARCH_DEBOUNCE,
        })
    }

    pub fn push_char(&mut self, ch: char) -> Option<PendingSearch> {
        if self.input.chars().count() >= QUERY_CHAR_LIMIT {
            return None;
        }
        let mut next = self.input.clone();
        next.push(ch);
        self.on_input_changed(next)
    }

    pub fn backspace(&mut self) -> Option<PendingSearch> {
        let mut next = self.input.clone();
        next.pop()?;
        self.on_input_changed(next)
    }

    /// Applies `results` only if `for_query` still matches the live input.
    /// Returns whether the batch was applied.
    pub fn on_results_arrived(&mut self, for_query: &str, results: Vec<R>) -> bool {
        if for_query != self.input {
            debug!(stale = for_query, live = %self.input, "stale search batch dropped");
            return false;
        }

        self.applied_query = Some(for_query.to_string());
        self.results = results;
        self.cursor = 0;
        true
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&R> {
        self.results.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.results.len() {
            self.cursor += 1;
        }
    }
}
