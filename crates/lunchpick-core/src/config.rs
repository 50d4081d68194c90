use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, LatLng, PlaceSource};
use crate::error::ConfigError;

const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
    // Blank values count as unset; `.env` templates tend to leave them empty.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_coord = |var: &str, default: &str, limit: f64| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value.abs() > limit {
            return Err(invalid(var, format!("must be within ±{limit}")));
        }
        Ok(value)
    };

    let place_source = match (optional("LUNCHPICK_PLACES_FILE"), optional("LUNCHPICK_SHEET_URL")) {
        (Some(path), _) => PlaceSource::File(PathBuf::from(path)),
        (None, Some(url)) => PlaceSource::Sheet(url),
        (None, None) => {
            return Err(ConfigError::MissingEnvVar(
                "LUNCHPICK_SHEET_URL".to_string(),
            ))
        }
    };

    let env = parse_environment(&or_default("LUNCHPICK_ENV", "development"))?;
    let log_level = or_default("LUNCHPICK_LOG_LEVEL", "info");
    let sheet_edit_url = optional("LUNCHPICK_SHEET_EDIT_URL");
    let places_api_key = optional("LUNCHPICK_PLACES_API_KEY");
    let places_base_url = or_default("LUNCHPICK_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);

    let default_location = LatLng {
        lat: parse_coord("LUNCHPICK_DEFAULT_LAT", "52.5200", 90.0)?,
        lng: parse_coord("LUNCHPICK_DEFAULT_LNG", "13.4050", 180.0)?,
    };

    let state_path = PathBuf::from(or_default(
        "LUNCHPICK_STATE_PATH",
        "./.lunchpick/state.json",
    ));

    let request_timeout_secs = parse_u64("LUNCHPICK_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("LUNCHPICK_USER_AGENT", "lunchpick/0.1 (lunch-picker)");
    let max_retries = parse_u32("LUNCHPICK_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("LUNCHPICK_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        place_source,
        sheet_edit_url,
        places_api_key,
        places_base_url,
        default_location,
        state_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LUNCHPICK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
