use crate::models::{TemperatureResponse, WeatherObservation};

pub const KELVIN_OFFSET: f64 = 273.15;

/// Expresses a Celsius reading in Celsius, Fahrenheit and Kelvin.
pub fn celsius_to_all(celsius: f64) -> TemperatureResponse {
    TemperatureResponse {
        celsius,
        fahrenheit: celsius * 1.8 + 32.0,
        kelvin: celsius + KELVIN_OFFSET,
    }
}

/// Builds the API response from an observation. Fahrenheit is always
/// recomputed from Celsius; the provider's own Fahrenheit value is ignored.
pub fn convert_observation(observation: &WeatherObservation) -> TemperatureResponse {
    celsius_to_all(observation.temperature_celsius)
}
