use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let upstream_token = require("MARKETLENS_UPSTREAM_TOKEN")?;

    let env = parse_environment(&or_default("MARKETLENS_ENV", "development"));
    let bind_addr = parse_addr("MARKETLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MARKETLENS_LOG_LEVEL", "info");

    let upstream_base_url = or_default(
        "MARKETLENS_UPSTREAM_BASE_URL",
        "https://mapi.indiamart.com/wservce/im/search/",
    );
    let upstream_modid = or_default("MARKETLENS_UPSTREAM_MODID", "ANDROID");
    let upstream_city = lookup("MARKETLENS_UPSTREAM_CITY")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let upstream_timeout_secs = parse_u64("MARKETLENS_UPSTREAM_TIMEOUT_SECS", "10")?;
    if upstream_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MARKETLENS_UPSTREAM_TIMEOUT_SECS".to_string(),
            reason: "deadline must be at least one second".to_string(),
        });
    }

    let user_agent = or_default("MARKETLENS_USER_AGENT", "marketlens/0.1 (product-search)");
    let default_query = or_default("MARKETLENS_DEFAULT_QUERY", "jute bag");
    let page_size = parse_u32("MARKETLENS_PAGE_SIZE", "20")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        upstream_token,
        upstream_modid,
        upstream_city,
        upstream_timeout_secs,
        user_agent,
        default_query,
        page_size,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
