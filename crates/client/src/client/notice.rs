//! Notice-detail method for [`RegistryClient`].

use crate::client::RegistryClient;
use crate::endpoints;
use crate::error::Result;

impl RegistryClient {
    /// Fetch one record's XML notice and return it as a nested JSON value.
    pub async fn notice(&self, id: &str) -> Result<serde_json::Value> {
        let spec = endpoints::notice_spec(&self.routes, id);
        let response = self.execute_authenticated(spec).await?;
        let xml = response.text().await?;
        endpoints::notice_to_value(&xml)
    }
}
