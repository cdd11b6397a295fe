use crate::models::{PostalLookupResult, ViaCepResponse};
use crate::services::{truncate_body, ClientError, PostalLookup, Provider};
use crate::validation::Zipcode;
use async_trait::async_trait;
use std::time::Duration;

/// Client for the ViaCEP postal-code lookup.
#[derive(Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    /// URL template containing `{cep}`.
    base_url: String,
}

impl ViaCepClient {
    /// Creates a new `ViaCepClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - URL template, e.g. `https://viacep.com.br/ws/{cep}/json/`.
    /// * `timeout` - Upper bound for the whole request.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidUrl {
                provider: Provider::ViaCep,
                message: format!("Failed to create ViaCEP client: {}", e),
            })?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, zipcode: &Zipcode) -> Result<reqwest::Url, ClientError> {
        let raw = self.base_url.replacen("{cep}", zipcode.digits(), 1);
        reqwest::Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            provider: Provider::ViaCep,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    /// Looks up a postal code.
    ///
    /// ViaCEP answers unknown codes with HTTP 200 and `{"erro": true}`; that
    /// becomes `found == false` rather than an error.
    async fn lookup(&self, zipcode: &Zipcode) -> Result<PostalLookupResult, ClientError> {
        let url = self.url_for(zipcode)?;
        tracing::info!("Fetching CEP {} from ViaCEP", zipcode);
        tracing::debug!("ViaCEP URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(Provider::ViaCep, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                provider: Provider::ViaCep,
                status: status.as_u16(),
                body: truncate_body(&error_text),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(Provider::ViaCep, e))?;
        let payload: ViaCepResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Parse {
                provider: Provider::ViaCep,
                message: e.to_string(),
            })?;

        let result = PostalLookupResult::from(payload);
        if result.found {
            tracing::info!("✓ CEP {} resolved to {}", zipcode, result.locality);
        } else {
            tracing::info!("CEP {} flagged as unknown by ViaCEP", zipcode);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_cep;

    #[test]
    fn test_client_creation() {
        let client = ViaCepClient::new(
            "https://viacep.com.br/ws/{cep}/json/".to_string(),
            Duration::from_secs(10),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_uses_digits_only() {
        let client = ViaCepClient::new(
            "https://viacep.com.br/ws/{cep}/json/".to_string(),
            Duration::from_secs(10),
        )
        .unwrap();
        let zipcode = validate_cep(Some("01001-000")).unwrap();
        assert_eq!(
            client.url_for(&zipcode).unwrap().as_str(),
            "https://viacep.com.br/ws/01001000/json/"
        );
    }
}
