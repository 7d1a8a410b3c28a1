use super::source::DensityEndpoint;
use crate::core::{bounds::GeoBounds, config::HeatmapOptions, constants::PROTOBUF_MEDIA_TYPE};
use crate::data::{density::DensityResult, proto};
use crate::traits::DensitySource;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;

/// Fetches density listings for a region from the data service.
///
/// One request per call: failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct DensityFetcher {
    client: reqwest::Client,
    endpoint: DensityEndpoint,
}

impl DensityFetcher {
    /// Build a fetcher from options, with its own HTTP client
    pub fn new(options: &HeatmapOptions) -> Result<Self, FetchError> {
        let endpoint = DensityEndpoint::new(&options.api_root)?;

        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, endpoint))
    }

    /// Share an existing client
    pub fn with_client(client: reqwest::Client, endpoint: DensityEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &DensityEndpoint {
        &self.endpoint
    }

    /// Query the service for `bounds` and decode the protobuf answer
    pub async fn fetch(&self, bounds: GeoBounds) -> Result<DensityResult, FetchError> {
        let url = self.endpoint.url(&bounds);
        log::debug!("fetch density {} from {}", bounds, url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, PROTOBUF_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        let result = proto::decode(&body)?;
        log::info!(
            "received {} bytes: {} samples, {} addresses, max count {}",
            body.len(),
            result.len(),
            result.total_count(),
            result.max_count
        );

        Ok(result)
    }
}

#[async_trait]
impl DensitySource for DensityFetcher {
    async fn fetch(&self, bounds: GeoBounds) -> Result<DensityResult, FetchError> {
        DensityFetcher::fetch(self, bounds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_from_options() {
        let options = HeatmapOptions::default()
            .with_api_root("http://127.0.0.1:9000/api")
            .with_request_timeout(Duration::from_secs(5));
        let fetcher = DensityFetcher::new(&options).unwrap();

        assert_eq!(
            fetcher.endpoint().list_url().as_str(),
            "http://127.0.0.1:9000/api/v1/ipv6"
        );
    }

    #[test]
    fn test_new_rejects_bad_root() {
        let options = HeatmapOptions::default().with_api_root("::not-a-url::");
        assert!(matches!(
            DensityFetcher::new(&options),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
