use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::SearchService;
use super::models::{PreviewResult, SearchRequest, SearchResultPage};
use crate::config::Config;
use crate::error::{ClientError, Result};

/// `SearchService` over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpSearchService {
    client: reqwest::Client,
    search_url: Url,
    preview_url: Url,
}

impl HttpSearchService {
    pub fn new(origin: &str, base_path: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, origin, base_path)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.origin, &config.base_path, config.timeout)
    }

    pub fn with_client(client: reqwest::Client, origin: &str, base_path: &str) -> Result<Self> {
        Ok(Self {
            client,
            search_url: endpoint(origin, base_path, "search")?,
            preview_url: endpoint(origin, base_path, "preview")?,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub fn preview_url(&self) -> &Url {
        &self.preview_url
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl SearchService for HttpSearchService {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResultPage> {
        log::debug!(
            "GET {} q={:?} page={} length={}",
            self.search_url,
            request.query,
            request.page,
            request.page_length
        );
        let req = self.client.get(self.search_url.clone()).query(request);
        self.fetch_json(req).await
    }

    async fn preview(&self, id: &str) -> Result<PreviewResult> {
        log::debug!("GET {} id={id:?}", self.preview_url);
        let req = self.client.get(self.preview_url.clone()).query(&[("id", id)]);
        self.fetch_json(req).await
    }
}

/// `{origin}{base_path}/{name}`, tolerating stray slashes on either part.
fn endpoint(origin: &str, base_path: &str, name: &str) -> Result<Url> {
    let base = base_path.trim_matches('/');
    let raw = if base.is_empty() {
        format!("{}/{name}", origin.trim_end_matches('/'))
    } else {
        format!("{}/{base}/{name}", origin.trim_end_matches('/'))
    };

    Url::parse(&raw).map_err(|source| ClientError::InvalidUrl { url: raw, source })
}
