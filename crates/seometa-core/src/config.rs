use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank secrets count as unset so `OPENAI_API_KEY=` in a `.env` disables AI.
    let optional_secret = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SEOMETA_ENV", "development"))?;

    let bind_addr = or_default("SEOMETA_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SEOMETA_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SEOMETA_LOG_LEVEL", "info");

    let catalog_base_url = or_default("CATALOG_BASE_URL", "https://store.example.com")
        .trim_end_matches('/')
        .to_owned();
    let catalog_api_token = optional_secret("CATALOG_API_TOKEN");

    let openai_api_key = optional_secret("OPENAI_API_KEY");
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com/v1")
        .trim_end_matches('/')
        .to_owned();
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");
    let openai_temperature = parse_temperature(&or_default("OPENAI_TEMPERATURE", "0.4"))?;

    let http_timeout_secs = parse_u64("SEOMETA_HTTP_TIMEOUT_SECS", "60")?;
    let http_connect_timeout_secs = parse_u64("SEOMETA_HTTP_CONNECT_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_base_url,
        catalog_api_token,
        openai_api_key,
        openai_base_url,
        openai_model,
        openai_temperature,
        http_timeout_secs,
        http_connect_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SEOMETA_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

/// Parse a sampling temperature, accepting the `[0, 2]` range chat models use.
fn parse_temperature(s: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "OPENAI_TEMPERATURE".to_string(),
        reason,
    };
    let value = s.parse::<f32>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!("must be between 0 and 2, got {value}")));
    }
    Ok(value)
}
