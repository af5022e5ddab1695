use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::models::ResultItem;
use crate::data_models::SearchSessionState;
use crate::pagination::PaginationWindow;

/// Presentation side of the controllers. Implementations own all layout and styling.
pub trait Renderer: Send + Sync {
    fn render_results(&self, results: &[ResultItem], window: &PaginationWindow, active_page: u32);

    fn render_preview(&self, markup: &str);

    /// Called before a search request goes out.
    fn search_started(&self, _session: &SearchSessionState) {}

    /// Receives the callback to invoke when the user activates a page control.
    fn subscribe_page_clicks(&self, _selector: PageSelector) {}
}

type SelectFn = dyn Fn(u32) -> Option<JoinHandle<()>> + Send + Sync;

/// Handle a renderer calls with the zero-based page index of an activated control.
///
/// Returns `None` once the controller behind it has been dropped.
#[derive(Clone)]
pub struct PageSelector {
    select: Arc<SelectFn>,
}

impl PageSelector {
    pub fn new<F>(select: F) -> PageSelector
    where
        F: Fn(u32) -> Option<JoinHandle<()>> + Send + Sync + 'static,
    {
        PageSelector {
            select: Arc::new(select),
        }
    }

    pub fn select(&self, page: u32) -> Option<JoinHandle<()>> {
        (self.select)(page)
    }
}

impl fmt::Debug for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSelector").finish_non_exhaustive()
    }
}
