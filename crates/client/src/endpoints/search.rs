//! Free-text trademark search endpoint.

use crate::endpoints::{RegistryRoutes, RequestSpec};
use crate::models::SearchQuery;

/// Build the search request: a JSON POST carrying the free-text query plus
/// paging and sort.
pub(crate) fn search_spec(routes: &RegistryRoutes, query: &SearchQuery) -> RequestSpec {
    RequestSpec::post_json(
        routes.search_path.clone(),
        serde_json::json!({
            "query": query.query,
            "page": query.page,
            "pageSize": query.page_size,
            "sort": query.sort,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_spec_serializes_paging_and_sort() {
        let routes = RegistryRoutes::default();
        let query = SearchQuery::new("acme").page(2).sort("relevance");
        let spec = search_spec(&routes, &query);
        let debug = format!("{spec:?}");
        assert!(debug.contains("acme"));
        assert!(debug.contains("relevance"));
    }
}
