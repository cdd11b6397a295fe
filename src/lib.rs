//! CEP Temperature API Library
//!
//! Resolves a Brazilian postal code (CEP) to its city through ViaCEP, fetches
//! the current weather for that city from WeatherAPI and answers with the
//! temperature in Celsius, Fahrenheit and Kelvin.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `cep_client`: ViaCEP client.
//! - `config`: Configuration management.
//! - `converter`: Temperature unit conversion.
//! - `errors`: Error types and HTTP error mapping.
//! - `handlers`: HTTP request handlers.
//! - `models`: Provider payloads and API models.
//! - `router`: Route and middleware assembly.
//! - `services`: Client capabilities and client errors.
//! - `temperature`: CEP → temperature workflow.
//! - `validation`: CEP validation.
//! - `weather_client`: WeatherAPI client.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and the binary
pub mod cep_client;
pub mod config;
pub mod converter;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod temperature;
pub mod validation;
pub mod weather_client;
