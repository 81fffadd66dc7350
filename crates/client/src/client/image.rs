//! Mark-image method for [`RegistryClient`].

use reqwest::header::CONTENT_TYPE;

use crate::client::RegistryClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{ImageData, ImageVariant};

impl RegistryClient {
    /// Fetch a mark image, proxied byte-for-byte with its content type.
    pub async fn image(&self, id: &str, variant: ImageVariant) -> Result<ImageData> {
        let spec = endpoints::image_spec(&self.routes, id, variant);
        let response = self.execute_authenticated(spec).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        Ok(ImageData {
            content_type,
            bytes,
        })
    }
}
