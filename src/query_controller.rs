use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::task::JoinHandle;

use crate::api::SearchService;
use crate::api::models::SearchRequest;
use crate::config::ControllerConfig;
use crate::data_models::{SearchSessionState, SearchUpdate};
use crate::pagination::PaginationWindow;
use crate::renderer::{PageSelector, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Idle,
    Searching,
}

/// Owns the search session and turns session updates into rendered result pages.
///
/// Every `search` spawns its own request task. Older requests are never cancelled and
/// their responses render whenever they arrive, so a slow stale page can still replace a
/// newer one on screen. Failures are logged and otherwise leave the screen alone.
pub struct QueryController<S, R> {
    session: Mutex<SearchSessionState>,
    in_flight: Arc<AtomicUsize>,
    config: ControllerConfig,
    service: Arc<S>,
    renderer: Arc<R>,
    this: Weak<Self>,
}

impl<S, R> QueryController<S, R>
where
    S: SearchService,
    R: Renderer + 'static,
{
    /// Create the controller and hand the renderer its page-click callback.
    pub fn new(service: Arc<S>, renderer: Arc<R>, config: ControllerConfig) -> Arc<Self> {
        let controller = Arc::new_cyclic(|this| QueryController {
            session: Mutex::new(SearchSessionState::new(config.page_length)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            config,
            service,
            renderer,
            this: this.clone(),
        });
        controller
            .renderer
            .subscribe_page_clicks(controller.page_selector());
        controller
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Arc<R> {
        &self.renderer
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> SearchSessionState {
        self.lock_session().clone()
    }

    pub fn status(&self) -> ControllerStatus {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            ControllerStatus::Searching
        } else {
            ControllerStatus::Idle
        }
    }

    /// Merge `update` into the session and fetch the resulting page.
    ///
    /// The merge is done before this returns; the request and the render happen on a
    /// spawned task, so this must be called from inside a tokio runtime. Awaiting the
    /// handle is optional and never yields an error.
    pub fn search(&self, update: SearchUpdate) -> JoinHandle<()> {
        let session = {
            let mut session = self.lock_session();
            session.merge(update);
            session.clone()
        };
        log::debug!("search session: {:?}", session);

        self.renderer.search_started(&session);

        let request = SearchRequest {
            page_length: self.config.fixed_page_length.unwrap_or(session.page_length),
            query: session.query,
            page: session.page,
        };
        let guard = InFlight::enter(&self.in_flight);
        let service = Arc::clone(&self.service);
        let renderer = Arc::clone(&self.renderer);

        tokio::spawn(async move {
            let _guard = guard;
            match service.search(&request).await {
                Ok(page) => {
                    let window = PaginationWindow::compute(page.total, page.length, page.page);
                    log::info!(
                        "query {:?}: {} total, page {} with {} results",
                        request.query,
                        page.total,
                        page.page,
                        page.results.len()
                    );
                    renderer.render_results(&page.results, &window, page.page);
                }
                Err(e) => {
                    log::error!(
                        "search for {:?} (page {}) failed, error: {:#}",
                        request.query,
                        request.page,
                        e
                    );
                }
            }
        })
    }

    /// Start a new query from the first page.
    pub fn submit(&self, query: impl Into<String>) -> JoinHandle<()> {
        self.search(SearchUpdate::submit(query))
    }

    /// Jump to `page`, keeping query and page length.
    pub fn select_page(&self, page: u32) -> JoinHandle<()> {
        self.search(SearchUpdate::page(page))
    }

    /// Callback for page controls. Holds the controller weakly.
    pub fn page_selector(&self) -> PageSelector {
        let this = self.this.clone();
        PageSelector::new(move |page| this.upgrade().map(|c| c.select_page(page)))
    }

    fn lock_session(&self) -> MutexGuard<'_, SearchSessionState> {
        // The session is only ever replaced field by field, so a poisoned lock still holds
        // a usable value.
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> InFlight {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
