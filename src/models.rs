use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Provider Payloads ============

/// Response body of the ViaCEP lookup (`/ws/{cep}/json/`).
///
/// Unknown codes come back as HTTP 200 with only the `erro` flag set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    /// City name.
    #[serde(default)]
    pub localidade: Option<String>,
    /// State abbreviation.
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub ibge: Option<String>,
    #[serde(default)]
    pub gia: Option<String>,
    #[serde(default)]
    pub ddd: Option<String>,
    #[serde(default)]
    pub siafi: Option<String>,
    /// Not-found flag. Sent as `true` or, by older deployments, `"true"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro: Option<Value>,
}

impl ViaCepResponse {
    /// Any `erro` value other than `false`/`"false"` marks the code as unknown.
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => !flag.eq_ignore_ascii_case("false"),
            Some(_) => true,
        }
    }
}

/// `location` block of a WeatherAPI `current.json` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherApiLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub localtime: Option<String>,
}

/// `current` block of a WeatherAPI `current.json` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiCurrent {
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiResponse {
    #[serde(default)]
    pub location: WeatherApiLocation,
    pub current: WeatherApiCurrent,
}

// ============ Domain Models ============

/// Outcome of a postal-code lookup. `found == false` is a valid answer, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalLookupResult {
    pub locality: String,
    pub found: bool,
}

impl PostalLookupResult {
    pub fn found(locality: impl Into<String>) -> Self {
        Self {
            locality: locality.into(),
            found: true,
        }
    }

    pub fn not_found() -> Self {
        Self {
            locality: String::new(),
            found: false,
        }
    }
}

impl From<ViaCepResponse> for PostalLookupResult {
    /// A payload without a city cannot be looked up further, so it counts as not found.
    fn from(response: ViaCepResponse) -> Self {
        if response.is_not_found() {
            return Self::not_found();
        }
        match response.localidade {
            Some(city) if !city.trim().is_empty() => Self::found(city),
            _ => Self::not_found(),
        }
    }
}

/// Current conditions for a city.
///
/// `temperature_fahrenheit` is carried as reported by the provider; the API
/// response recomputes Fahrenheit from Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_celsius: f64,
    pub temperature_fahrenheit: f64,
}

impl From<WeatherApiResponse> for WeatherObservation {
    fn from(response: WeatherApiResponse) -> Self {
        Self {
            temperature_celsius: response.current.temp_c,
            temperature_fahrenheit: response.current.temp_f,
        }
    }
}

// ============ API Response Models ============

/// Success body of `GET /api/v1/temperature/{cep}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

/// Body returned on every failure path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Body of the health and readiness endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}
