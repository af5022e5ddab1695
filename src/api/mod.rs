use std::future::Future;

use crate::error::Result;

pub mod client;
pub mod models;

pub use client::HttpSearchService;
use models::{PreviewResult, SearchRequest, SearchResultPage};

/// The remote search/preview service as the controllers see it.
pub trait SearchService: Send + Sync + 'static {
    /// `GET {base}/search?q=..&page=..&length=..`
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResultPage>> + Send;

    /// `GET {base}/preview?id=..`
    fn preview(&self, id: &str) -> impl Future<Output = Result<PreviewResult>> + Send;
}
