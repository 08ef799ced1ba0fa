use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_KIWI_BASE_URL: &str = "https://tequila-api.kiwi.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if `KIWI_API_KEY` is missing or a value is invalid.
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
/// Returns `ConfigError` if `KIWI_API_KEY` is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    // An empty key is as useless as a missing one.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    };

    let kiwi_api_key = require("KIWI_API_KEY")?;
    let kiwi_base_url = or_default("FARERATIO_KIWI_BASE_URL", DEFAULT_KIWI_BASE_URL);
    if !kiwi_base_url.starts_with("http://") && !kiwi_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "FARERATIO_KIWI_BASE_URL".to_string(),
            reason: "must be an http or https URL".to_string(),
        });
    }

    let currency = or_default("FARERATIO_CURRENCY", "USD").to_uppercase();
    let request_timeout_secs = parse_optional_u64("FARERATIO_REQUEST_TIMEOUT_SECS")?;
    let bind_addr = parse_addr("FARERATIO_BIND_ADDR", "127.0.0.1:5000")?;
    let log_level = or_default("FARERATIO_LOG_LEVEL", "info");

    Ok(AppConfig {
        kiwi_api_key,
        kiwi_base_url,
        currency,
        request_timeout_secs,
        bind_addr,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
