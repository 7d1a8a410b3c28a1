use crate::core::{bounds::GeoBounds, constants::IPV6_LIST_PATH};
use crate::FetchError;
use reqwest::Url;

/// Builds density query URLs under an API root
#[derive(Debug, Clone, PartialEq)]
pub struct DensityEndpoint {
    list_url: Url,
}

impl DensityEndpoint {
    /// `api_root` may carry a path prefix; the listing path is appended to it
    pub fn new(api_root: &str) -> Result<Self, FetchError> {
        let mut root = Url::parse(api_root.trim())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", api_root, e)))?;
        if root.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{}: cannot hold a path",
                api_root
            )));
        }

        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        let list_url = root
            .join(IPV6_LIST_PATH)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", api_root, e)))?;

        Ok(Self { list_url })
    }

    /// URL of the listing without any query
    pub fn list_url(&self) -> &Url {
        &self.list_url
    }

    /// Build the query URL for the requested `bounds`
    pub fn url(&self, bounds: &GeoBounds) -> Url {
        let mut url = self.list_url.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(bounds.query_pairs());
        url
    }
}
