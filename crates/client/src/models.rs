//! Data models for registry requests and responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use marksearch_config::constants::{DEFAULT_SEARCH_PAGE_SIZE, MAX_SEARCH_PAGE_SIZE};

/// A free-text trademark search with paging and sort.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    /// Free-text query; must be non-empty after trimming.
    pub query: String,
    /// Zero-based page index.
    pub page: u64,
    /// Page size, capped at the registry's maximum.
    pub page_size: u64,
    /// Optional sort key understood by the upstream (e.g. "relevance").
    pub sort: Option<String>,
}

impl SearchQuery {
    /// Create a query for `text` with default paging and no sort.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            query: text.into(),
            page: 0,
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
            sort: None,
        }
    }

    /// Select a result page.
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size, clamped to the registry maximum.
    pub fn page_size(mut self, size: u64) -> Self {
        self.page_size = size.min(MAX_SEARCH_PAGE_SIZE);
        self
    }

    /// Set the sort key.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// One page of search results.
///
/// An empty `hits` collection is a successful response, distinct from any
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(rename = "totalResults", default)]
    pub total: u64,
    #[serde(rename = "results", default)]
    pub hits: Vec<TrademarkHit>,
}

/// One trademark record from the search results collection.
///
/// Only the fields the application relies on are typed; everything else the
/// upstream includes rides along in `extra` so responses can be passed
/// through unfiltered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrademarkHit {
    pub id: String,
    #[serde(default)]
    pub mark_text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub nice_classes: Vec<u32>,
    #[serde(default)]
    pub applicant: Option<String>,
    #[serde(default)]
    pub application_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Which rendition of a mark image to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageVariant {
    Thumbnail,
    Full,
}

impl ImageVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageVariant::Thumbnail => "thumbnail",
            ImageVariant::Full => "full",
        }
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thumbnail" => Ok(ImageVariant::Thumbnail),
            "full" => Ok(ImageVariant::Full),
            other => Err(format!("unknown image variant {other:?}")),
        }
    }
}

/// Binary image data proxied byte-for-byte from the upstream.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
