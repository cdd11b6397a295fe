/// Temperature-by-CEP workflow
///
/// 1. Validate the raw CEP path parameter
/// 2. Resolve the locality via the postal lookup
/// 3. Stop with "not found" when the provider does not know the code
/// 4. Fetch current weather for the locality
/// 5. Convert to Celsius / Fahrenheit / Kelvin
///
/// Every failure short-circuits to an `AppError`; nothing is retried.
use crate::converter::convert_observation;
use crate::errors::AppError;
use crate::models::TemperatureResponse;
use crate::services::{PostalLookup, WeatherLookup};
use crate::validation::validate_cep;
use std::sync::Arc;

#[derive(Clone)]
pub struct TemperatureService {
    postal: Arc<dyn PostalLookup>,
    weather: Arc<dyn WeatherLookup>,
}

impl TemperatureService {
    pub fn new(postal: Arc<dyn PostalLookup>, weather: Arc<dyn WeatherLookup>) -> Self {
        Self { postal, weather }
    }

    /// Runs the workflow for a raw `{cep}` path parameter (`None` when absent).
    pub async fn temperature_for_cep(
        &self,
        raw_cep: Option<&str>,
    ) -> Result<TemperatureResponse, AppError> {
        let zipcode = validate_cep(raw_cep)?;

        let postal = self.postal.lookup(&zipcode).await.map_err(|e| {
            tracing::error!("Failed to get CEP information for {}: {}", zipcode, e);
            AppError::Client(e)
        })?;

        if !postal.found {
            return Err(AppError::ZipcodeNotFound(zipcode.to_string()));
        }

        let observation = self.weather.current(&postal.locality).await.map_err(|e| {
            tracing::error!(
                "Failed to get weather for {} (CEP {}): {}",
                postal.locality,
                zipcode,
                e
            );
            AppError::Client(e)
        })?;

        let temperature = convert_observation(&observation);
        tracing::info!(
            "CEP {} ({}) -> {:.1}°C / {:.1}°F / {:.2}K",
            zipcode,
            postal.locality,
            temperature.celsius,
            temperature.fahrenheit,
            temperature.kelvin
        );
        Ok(temperature)
    }
}
