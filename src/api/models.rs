use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters of `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "q")]
    pub query: String,
    pub page: u32,
    #[serde(rename = "length")]
    pub page_length: u32,
}

/// One page of hits. `total` counts matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub total: u64,
    pub length: u32,
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub work: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fragments: Vec<String>,
    /// Full document text; some service versions embed it in every hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ResultItem {
    /// Fragments joined the way the results table shows them.
    pub fn excerpt(&self) -> String {
        self.fragments.join(" ... ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub preview: String,
}

// The service encodes an empty list as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
