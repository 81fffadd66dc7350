//! Free-text search method for [`RegistryClient`].

use crate::client::RegistryClient;
use crate::endpoints;
use crate::error::{Error, Result};
use crate::models::{SearchQuery, SearchResults};

impl RegistryClient {
    /// Execute a free-text trademark search.
    ///
    /// An empty (or whitespace-only) query is rejected locally as
    /// [`Error::MissingQuery`] without touching the upstream. An empty
    /// results collection is a successful response.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        if query.query.trim().is_empty() {
            return Err(Error::MissingQuery);
        }
        let spec = endpoints::search_spec(&self.routes, query);
        let response = self.execute_authenticated(spec).await?;
        Ok(response.json().await?)
    }
}
