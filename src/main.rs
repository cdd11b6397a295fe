use cep_temperature_api::cep_client::ViaCepClient;
use cep_temperature_api::config::Config;
use cep_temperature_api::handlers::AppState;
use cep_temperature_api::router::build_router;
use cep_temperature_api::temperature::TemperatureService;
use cep_temperature_api::weather_client::WeatherApiClient;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - ViaCEP and WeatherAPI clients.
/// - HTTP routes and middleware.
///
/// It then starts the Axum server and drains in-flight requests on
/// Ctrl-C / SIGTERM for at most `SHUTDOWN_GRACE_SECS`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cep_temperature_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let cep_client = ViaCepClient::new(config.viacep_base_url.clone(), config.http_client_timeout)?;
    tracing::info!("✓ ViaCEP client initialized: {}", config.viacep_base_url);

    let weather_client = WeatherApiClient::new(
        config.weather_base_url.clone(),
        config.weather_api_key.clone(),
        config.http_client_timeout,
    )?;
    tracing::info!("✓ WeatherAPI client initialized: {}", config.weather_base_url);

    let app_state = Arc::new(AppState {
        temperature: TemperatureService::new(Arc::new(cep_client), Arc::new(weather_client)),
    });

    let app = build_router(app_state, config.mode);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {} (mode: {})", addr, config.mode);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server stopped on its own, before any signal
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutting down server...");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(config.shutdown_grace, &mut server).await {
        Ok(result) => {
            result??;
            tracing::info!("Server gracefully stopped");
        }
        Err(_) => {
            tracing::error!(
                "Server forced to shutdown after {:?} grace period",
                config.shutdown_grace
            );
            server.abort();
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
