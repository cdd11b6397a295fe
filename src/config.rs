use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws/{cep}/json/";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1/current.json";

/// How the HTTP surface is assembled. Passed explicitly to the router builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Debug,
    Release,
    Test,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Debug => "debug",
            AppMode::Release => "release",
            AppMode::Test => "test",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "debug" => Ok(AppMode::Debug),
            "release" => Ok(AppMode::Release),
            "test" => Ok(AppMode::Test),
            other => anyhow::bail!("APP_MODE must be one of debug, release, test (got '{}')", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub weather_api_key: String,
    /// URL template; `{cep}` is replaced with the 8-digit code.
    pub viacep_base_url: String,
    pub weather_base_url: String,
    pub mode: AppMode,
    pub http_client_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))
                .and_then(|port: u16| {
                    if port == 0 {
                        anyhow::bail!("PORT must be a valid number between 1-65535");
                    }
                    Ok(port)
                })?,
            weather_api_key: std::env::var("WEATHER_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("WEATHER_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            viacep_base_url: std::env::var("VIACEP_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| Ok(DEFAULT_VIACEP_BASE_URL.to_string()), |url| {
                    validate_http_url("VIACEP_BASE_URL", url)
                })
                .and_then(|url| {
                    if !url.contains("{cep}") {
                        anyhow::bail!("VIACEP_BASE_URL must contain the {{cep}} placeholder");
                    }
                    Ok(url)
                })?,
            weather_base_url: std::env::var("WEATHER_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| Ok(DEFAULT_WEATHER_BASE_URL.to_string()), |url| {
                    validate_http_url("WEATHER_BASE_URL", url)
                })?,
            mode: std::env::var("APP_MODE")
                .or_else(|_| std::env::var("GIN_MODE"))
                .unwrap_or_else(|_| "release".to_string())
                .parse()?,
            http_client_timeout: seconds_from_env("HTTP_CLIENT_TIMEOUT_SECS", 10)?,
            shutdown_grace: seconds_from_env("SHUTDOWN_GRACE_SECS", 10)?,
        };

        // Never log the API key
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("ViaCEP Base URL: {}", config.viacep_base_url);
        tracing::debug!("Weather Base URL: {}", config.weather_base_url);
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Mode: {}", config.mode);

        Ok(config)
    }
}

fn validate_http_url(name: &str, url: String) -> anyhow::Result<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(url)
}

fn seconds_from_env(name: &str, default: u64) -> anyhow::Result<Duration> {
    let secs: u64 = match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a whole number of seconds", name))?,
        Err(_) => default,
    };
    if secs == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(Duration::from_secs(secs))
}
