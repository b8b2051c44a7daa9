use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are optional here: each adapter decides at construction time
/// whether a missing credential is fatal for it.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so an empty line in `.env` does not
    // masquerade as a credential.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<i32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let climate_dataset_path = PathBuf::from(or_default(
        "GRISP_CLIMATE_DATASET",
        "data/static_reports/ndgain.csv",
    ));
    let terrorism_dataset_path = PathBuf::from(or_default(
        "GRISP_TERRORISM_DATASET",
        "data/static_reports/gtd.csv",
    ));

    let reference_year = parse_i32("GRISP_REFERENCE_YEAR", "2024")?;
    let terrorism_window_years = parse_u32("GRISP_TERRORISM_WINDOW_YEARS", "5")?;
    let economic_window_years = parse_u32("GRISP_ECONOMIC_WINDOW_YEARS", "10")?;

    let user_agent = or_default("GRISP_USER_AGENT", "grisp/0.1 (risk-report)");
    let log_level = or_default("GRISP_LOG_LEVEL", "info");

    Ok(AppConfig {
        climate_dataset_path,
        terrorism_dataset_path,
        reference_year,
        terrorism_window_years,
        economic_window_years,
        user_agent,
        log_level,
        newsapi_key: optional("NEWSAPI_KEY"),
        google_api_key: optional("GOOGLE_API_KEY"),
        google_cx_id: optional("CX_ID"),
        twitter_bearer_token: optional("TWITTER_BEARER_TOKEN"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
