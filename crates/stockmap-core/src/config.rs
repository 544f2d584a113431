use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Public inventory endpoint used when `STOCKMAP_INVENTORY_URL` is not set.
pub const DEFAULT_INVENTORY_URL: &str = "https://eow4gra92oz16n8.m.pipedream.net";

/// Static bearer credential the inventory endpoint expects.
pub const DEFAULT_INVENTORY_TOKEN: &str = "kirkland";

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
/// Every variable has a default, so an empty environment yields a working
/// configuration pointed at the public endpoint.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("STOCKMAP_ENV", "development"));
    let log_level = or_default("STOCKMAP_LOG_LEVEL", "info");

    let inventory_url = or_default("STOCKMAP_INVENTORY_URL", DEFAULT_INVENTORY_URL);
    if !(inventory_url.starts_with("https://") || inventory_url.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKMAP_INVENTORY_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{inventory_url}'"),
        });
    }
    let inventory_token = or_default("STOCKMAP_INVENTORY_TOKEN", DEFAULT_INVENTORY_TOKEN);

    let storage_path = PathBuf::from(or_default(
        "STOCKMAP_STORAGE_PATH",
        "./.stockmap/storage.json",
    ));
    let export_styles_path = lookup("STOCKMAP_EXPORT_STYLES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let narrow_viewport_px = parse_u32("STOCKMAP_NARROW_VIEWPORT_PX", "1024")?;

    Ok(AppConfig {
        env,
        log_level,
        inventory_url,
        inventory_token,
        storage_path,
        export_styles_path,
        narrow_viewport_px,
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
