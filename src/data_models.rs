use serde::{Deserialize, Serialize};

/// What the user is currently looking at: query text, zero-based page and page length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchSessionState {
    pub query: String,
    pub page: u32,
    pub page_length: u32,
}

impl SearchSessionState {
    pub fn new(page_length: u32) -> SearchSessionState {
        SearchSessionState {
            query: String::new(),
            page: 0,
            page_length: page_length.max(1),
        }
    }

    /// Overwrite the fields present in `update`, keep the rest.
    pub fn merge(&mut self, update: SearchUpdate) {
        if let Some(query) = update.query {
            self.query = query;
        }
        if let Some(page) = update.page {
            self.page = page;
        }
        if let Some(page_length) = update.page_length {
            self.page_length = page_length.max(1);
        }
    }
}

/// Partial update for `QueryController::search`. `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchUpdate {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub page_length: Option<u32>,
}

impl SearchUpdate {
    pub fn new() -> SearchUpdate {
        SearchUpdate::default()
    }

    /// Only the page changes; this is what a page control sends.
    pub fn page(page: u32) -> SearchUpdate {
        SearchUpdate::new().with_page(page)
    }

    /// A fresh query starting at the first page, as a form submission does.
    pub fn submit(query: impl Into<String>) -> SearchUpdate {
        SearchUpdate::new().with_query(query).with_page(0)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> SearchUpdate {
        self.query = Some(query.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> SearchUpdate {
        self.page = Some(page);
        self
    }

    pub fn with_page_length(mut self, page_length: u32) -> SearchUpdate {
        self.page_length = Some(page_length);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_empty_at_first_page() {
        let state = SearchSessionState::new(10);
        assert_eq!(state.query, "");
        assert_eq!(state.page, 0);
        assert_eq!(state.page_length, 10);
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let mut state = SearchSessionState::new(10);
        state.merge(SearchUpdate::submit("hamlet"));
        state.merge(SearchUpdate::page(3));
        assert_eq!(state.query, "hamlet");
        assert_eq!(state.page, 3);
        assert_eq!(state.page_length, 10);

        state.merge(SearchUpdate::new().with_query("lear"));
        assert_eq!(state.query, "lear");
        assert_eq!(state.page, 3);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut state = SearchSessionState::new(8);
        state.merge(SearchUpdate::submit("x"));
        let before = state.clone();
        state.merge(SearchUpdate::new());
        assert_eq!(state, before);
    }

    #[test]
    fn page_length_never_drops_below_one() {
        let mut state = SearchSessionState::new(0);
        assert_eq!(state.page_length, 1);
        state.merge(SearchUpdate::new().with_page_length(0));
        assert_eq!(state.page_length, 1);
        state.merge(SearchUpdate::new().with_page_length(25));
        assert_eq!(state.page_length, 25);
    }
}
