//! Mark-image endpoint.

use crate::endpoints::{RegistryRoutes, RequestSpec};
use crate::models::ImageVariant;

/// Build the image request: GET of the binary image data for one record.
pub(crate) fn image_spec(routes: &RegistryRoutes, id: &str, variant: ImageVariant) -> RequestSpec {
    RequestSpec::get(format!("{}/{}/{}", routes.image_path, id, variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_spec_includes_id_and_variant() {
        let routes = RegistryRoutes::default();
        let spec = image_spec(&routes, "TM-42", ImageVariant::Thumbnail);
        assert!(format!("{spec:?}").contains("/api/images/TM-42/thumbnail"));
    }
}
