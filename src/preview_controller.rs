use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::SearchService;
use crate::emphasis::{EmphasisMarkers, HTML_MARKERS, parse_emphasis_with};
use crate::renderer::Renderer;

/// Fetches one document's full text and renders it with emphasis applied.
pub struct PreviewController<S, R> {
    service: Arc<S>,
    renderer: Arc<R>,
    markers: EmphasisMarkers<'static>,
}

impl<S, R> PreviewController<S, R>
where
    S: SearchService,
    R: Renderer + 'static,
{
    pub fn new(service: Arc<S>, renderer: Arc<R>) -> Self {
        Self {
            service,
            renderer,
            markers: HTML_MARKERS,
        }
    }

    pub fn with_markers(mut self, markers: EmphasisMarkers<'static>) -> Self {
        self.markers = markers;
        self
    }

    /// Fetch and render the preview for `id` on a spawned task. Errors are only logged.
    pub fn preview(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let service = Arc::clone(&self.service);
        let renderer = Arc::clone(&self.renderer);
        let markers = self.markers;

        tokio::spawn(async move {
            match service.preview(&id).await {
                Ok(res) => {
                    let markup = parse_emphasis_with(&res.preview, markers);
                    renderer.render_preview(&markup);
                }
                Err(e) => {
                    log::error!("preview of {id:?} failed, error: {:#}", e);
                }
            }
        })
    }
}
