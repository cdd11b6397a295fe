//! Capabilities the temperature orchestrator depends on.
//!
//! Production clients (`ViaCepClient`, `WeatherApiClient`) and test doubles
//! both implement these traits and are injected at construction.

use crate::models::{PostalLookupResult, WeatherObservation};
use crate::validation::Zipcode;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Which upstream provider a `ClientError` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    ViaCep,
    WeatherApi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::ViaCep => "viacep",
            Provider::WeatherApi => "weatherapi",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure talking to an upstream provider. Never shown to API callers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{provider} request could not be built: {message}")]
    InvalidUrl { provider: Provider, message: String },

    #[error("{provider} request timed out")]
    Timeout { provider: Provider },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("failed to parse {provider} response: {message}")]
    Parse { provider: Provider, message: String },
}

impl ClientError {
    pub fn provider(&self) -> Provider {
        match self {
            ClientError::InvalidUrl { provider, .. }
            | ClientError::Timeout { provider }
            | ClientError::Transport { provider, .. }
            | ClientError::Status { provider, .. }
            | ClientError::Parse { provider, .. } => *provider,
        }
    }

    /// Classifies a `reqwest` send/read failure.
    pub fn from_reqwest(provider: Provider, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { provider }
        } else {
            ClientError::Transport {
                provider,
                source: err,
            }
        }
    }
}

/// Resolves a postal code to its locality.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn lookup(&self, zipcode: &Zipcode) -> Result<PostalLookupResult, ClientError>;
}

/// Fetches current weather for a city.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherObservation, ClientError>;
}

/// Caps the size of upstream error bodies kept for logs.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
