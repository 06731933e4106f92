use crate::app_config::{ApiPaths, AppConfig, Environment};
use crate::ConfigError;

const LOCAL_API_BASE_URL: &str = "http://127.0.0.1:3000";
const REMOTE_API_BASE_URL: &str = "https://wavy.dev.wavelink.co";

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
/// Every variable has a default, so the only failure mode is a value that
/// does not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let path_var = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with('/') {
            Ok(raw)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("path must start with '/', got \"{raw}\""),
            })
        }
    };

    let env = parse_environment(&or_default("WAVY_ENV", "development"));

    let local = lookup("WAVY_LOCAL_DEPLOYMENT").is_ok_and(|v| v == "true");
    let fallback_base = if local {
        LOCAL_API_BASE_URL
    } else {
        REMOTE_API_BASE_URL
    };
    let api_base_url = or_default("WAVY_API_BASE_URL", fallback_base);
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "WAVY_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_base_url}\""),
        });
    }

    let defaults = ApiPaths::default();
    let api_paths = ApiPaths {
        videos: path_var("WAVY_VIDEOS_PATH", &defaults.videos)?,
        profile: path_var("WAVY_PROFILE_PATH", &defaults.profile)?,
        campaigns: path_var("WAVY_CAMPAIGNS_PATH", &defaults.campaigns)?,
        logout: path_var("WAVY_LOGOUT_PATH", &defaults.logout)?,
        login_with_token: path_var("WAVY_LOGIN_WITH_TOKEN_PATH", &defaults.login_with_token)?,
        tiktok_login: path_var("WAVY_TIKTOK_LOGIN_PATH", &defaults.tiktok_login)?,
    };

    let log_level = or_default("WAVY_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("WAVY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("WAVY_USER_AGENT", "wavy/0.1 (creator-dashboard)");

    let poll_interval_ms = parse_u64("WAVY_POLL_INTERVAL_MS", "1000")?;
    if poll_interval_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WAVY_POLL_INTERVAL_MS".to_string(),
            reason: "poll interval must be greater than zero".to_string(),
        });
    }

    let session_dir = lookup("WAVY_SESSION_DIR").map_or_else(
        |_| std::env::temp_dir().join("wavy-session"),
        PathBuf::from,
    );

    let login_path = path_var("WAVY_LOGIN_PATH", "/login")?;
    let dashboard_path = path_var("WAVY_DASHBOARD_PATH", "/dashboard")?;

    Ok(AppConfig {
        env,
        api_base_url,
        api_paths,
        log_level,
        request_timeout_secs,
        user_agent,
        poll_interval_ms,
        session_dir,
        login_path,
        dashboard_path,
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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
