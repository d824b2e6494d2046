//! Page fetch state and stale-response handling for views.
//!
//! A view issues a ticket for every catalog request it starts and only
//! applies a response whose ticket is still the latest one, so a slow
//! response for a superseded request (e.g. a previous category) is dropped.
//!
//! The terminal storefront settles each page from a single request with
//! [`PageState::from_result`]. [`RequestTracker`] is for embedding views that
//! keep several requests in flight, such as a listing whose category filter
//! changes while the previous fetch is still pending.

use serde::Serialize;

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum PageState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Settle from a request outcome.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => PageState::Ready(value),
            Err(e) => PageState::Failed(e.to_string()),
        }
    }
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Loading
    }
}

/// Identifies one request issued by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Issues request tickets and recognizes superseded ones.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// True only for the most recently issued ticket.
    pub fn accept(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply `result` to `state` if `ticket` is current; returns whether it was applied.
    pub fn settle<T, E: std::fmt::Display>(
        &self,
        ticket: RequestTicket,
        state: &mut PageState<T>,
        result: Result<T, E>,
    ) -> bool {
        if !self.accept(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "discarding stale response");
            return false;
        }
        *state = PageState::from_result(result);
        true
    }
}
