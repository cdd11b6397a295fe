use crate::errors::AppError;
use crate::models::{StatusResponse, TemperatureResponse};
use crate::temperature::TemperatureService;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "cep-temperature-api";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// CEP → temperature workflow with its injected clients.
    pub temperature: TemperatureService,
}

fn status_response(status: &str) -> StatusResponse {
    StatusResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<StatusResponse>) {
    (StatusCode::OK, Json(status_response("healthy")))
}

/// Readiness check endpoint.
pub async fn readiness() -> (StatusCode, Json<StatusResponse>) {
    (StatusCode::OK, Json(status_response("ready")))
}

/// GET /api/v1/temperature/:cep
///
/// Returns the current temperature for the city of a Brazilian postal code.
///
/// # Returns
///
/// * `200` - `{celsius, fahrenheit, kelvin}`
/// * `404` - `{"message": "can not find zipcode"}`
/// * `422` - `{"message": "invalid zipcode"}`
/// * `500` - `{"message": "internal server error"}`
pub async fn get_temperature(
    State(state): State<Arc<AppState>>,
    cep: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureResponse>, AppError> {
    // A segment that does not decode to UTF-8 can never be a CEP
    let Path(cep) = cep.map_err(|rejection| AppError::InvalidZipcode(rejection.body_text()))?;
    tracing::info!("GET /api/v1/temperature/{}", cep);

    let temperature = state.temperature.temperature_for_cep(Some(&cep)).await?;
    Ok(Json(temperature))
}

/// GET /api/v1/temperature/ (no CEP segment)
pub async fn get_temperature_without_cep(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemperatureResponse>, AppError> {
    let temperature = state.temperature.temperature_for_cep(None).await?;
    Ok(Json(temperature))
}
