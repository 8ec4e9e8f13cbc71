use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client as HttpClient;

use super::models::{FetchError, SignalSample, SthResponse};
use crate::config::DashboardConfig;

/// STH-Comet API client for querying a single device's historical readings
pub struct SthClient {
    http_client: HttpClient,
    base_url: String,
    device_type: String,
    device_id: String,
    fiware_service: String,
    fiware_service_path: String,
}

impl SthClient {
    /// Create a client bound to the endpoint identity in the configuration
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: format!("http://{}:{}", config.sth_host, config.sth_port),
            device_type: config.device_type.clone(),
            device_id: config.device_id.clone(),
            fiware_service: config.fiware_service.clone(),
            fiware_service_path: config.fiware_service_path.clone(),
        }
    }

    /// Tenant headers required by every STH request
    fn create_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let service = HeaderValue::from_str(&self.fiware_service)
            .map_err(|e| FetchError::Transport(format!("Invalid fiware-service header: {}", e)))?;
        headers.insert("fiware-service", service);

        let service_path = HeaderValue::from_str(&self.fiware_service_path).map_err(|e| {
            FetchError::Transport(format!("Invalid fiware-servicepath header: {}", e))
        })?;
        headers.insert("fiware-servicepath", service_path);

        Ok(headers)
    }

    /// GET /STH/v1/contextEntities/type/{type}/id/{id}/attributes/{attribute}?lastN={n}
    ///
    /// Retrieves up to `last_n` historical readings for one attribute, oldest
    /// first as the API returns them. One network call, no retry; the next
    /// scheduled tick is the retry mechanism.
    pub async fn fetch_signal(
        &self,
        attribute: &str,
        last_n: u32,
    ) -> Result<Vec<SignalSample>, FetchError> {
        let url = format!(
            "{}/STH/v1/contextEntities/type/{}/id/{}/attributes/{}?lastN={}",
            self.base_url, self.device_type, self.device_id, attribute, last_n
        );
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .json::<SthResponse>()
            .await
            .map_err(|e| FetchError::Shape(format!("Failed to parse response: {}", e)))?;

        body.into_samples()
    }
}
