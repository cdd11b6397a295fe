use crate::models::{WeatherApiResponse, WeatherObservation};
use crate::services::{truncate_body, ClientError, Provider, WeatherLookup};
use async_trait::async_trait;
use std::time::Duration;

/// Client for the WeatherAPI `current.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Creates a new `WeatherApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `http://api.weatherapi.com/v1/current.json`.
    /// * `api_key` - WeatherAPI key, sent as the `key` query parameter.
    /// * `timeout` - Upper bound for the whole request.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidUrl {
                provider: Provider::WeatherApi,
                message: format!("Failed to create WeatherAPI client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Builds the request URL. The city is percent-encoded as a query value.
    fn url_for(&self, city: &str) -> Result<reqwest::Url, ClientError> {
        url::Url::parse_with_params(
            &self.base_url,
            &[("key", self.api_key.as_str()), ("q", city), ("aqi", "no")],
        )
        .map_err(|e| ClientError::InvalidUrl {
            provider: Provider::WeatherApi,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    async fn current(&self, city: &str) -> Result<WeatherObservation, ClientError> {
        let url = self.url_for(city)?;
        tracing::info!("Fetching current weather for: {}", city);
        // Redact key from logs
        tracing::debug!("WeatherAPI URL: {}?key=[REDACTED]&q={}&aqi=no", self.base_url, city);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(Provider::WeatherApi, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                provider: Provider::WeatherApi,
                status: status.as_u16(),
                body: truncate_body(&error_text),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(Provider::WeatherApi, e))?;
        let payload: WeatherApiResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Parse {
                provider: Provider::WeatherApi,
                message: e.to_string(),
            })?;

        tracing::info!(
            "✓ Weather for {} ({}): {}°C",
            city,
            payload.location.name.as_deref().unwrap_or("unknown location"),
            payload.current.temp_c
        );
        Ok(WeatherObservation::from(payload))
    }
}
