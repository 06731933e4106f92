use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "https://wavy.dev.wavelink.co");
    assert_eq!(cfg.api_paths, ApiPaths::default());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "wavy/0.1 (creator-dashboard)");
    assert_eq!(cfg.poll_interval_ms, 1000);
    assert_eq!(cfg.session_dir, std::env::temp_dir().join("wavy-session"));
    assert_eq!(cfg.login_path, "/login");
    assert_eq!(cfg.dashboard_path, "/dashboard");
}

#[test]
fn local_deployment_switches_base_url() {
    let mut map = HashMap::new();
    map.insert("WAVY_LOCAL_DEPLOYMENT", "true");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:3000");
}

#[test]
fn local_deployment_other_values_keep_remote_base_url() {
    let mut map = HashMap::new();
    map.insert("WAVY_LOCAL_DEPLOYMENT", "1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://wavy.dev.wavelink.co");
}

#[test]
fn explicit_base_url_wins_over_local_deployment() {
    let mut map = HashMap::new();
    map.insert("WAVY_LOCAL_DEPLOYMENT", "true");
    map.insert("WAVY_API_BASE_URL", "https://api.example.test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://api.example.test");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("WAVY_API_BASE_URL", "ftp://example.test");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAVY_API_BASE_URL"),
        "expected InvalidEnvVar(WAVY_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn poll_interval_override() {
    let mut map = HashMap::new();
    map.insert("WAVY_POLL_INTERVAL_MS", "15000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.poll_interval_ms, 15_000);
}

#[test]
fn poll_interval_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("WAVY_POLL_INTERVAL_MS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAVY_POLL_INTERVAL_MS"),
        "expected InvalidEnvVar(WAVY_POLL_INTERVAL_MS), got: {result:?}"
    );
}

#[test]
fn poll_interval_invalid() {
    let mut map = HashMap::new();
    map.insert("WAVY_POLL_INTERVAL_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAVY_POLL_INTERVAL_MS"),
        "expected InvalidEnvVar(WAVY_POLL_INTERVAL_MS), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("WAVY_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAVY_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(WAVY_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn endpoint_path_override() {
    let mut map = HashMap::new();
    map.insert("WAVY_LOGOUT_PATH", "/logout");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_paths.logout, "/logout");
    assert_eq!(cfg.api_paths.profile, "/api/v1/profile");
}

#[test]
fn endpoint_path_without_leading_slash_is_rejected() {
    let mut map = HashMap::new();
    map.insert("WAVY_PROFILE_PATH", "api/v1/profile");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAVY_PROFILE_PATH"),
        "expected InvalidEnvVar(WAVY_PROFILE_PATH), got: {result:?}"
    );
}

#[test]
fn session_dir_override() {
    let mut map = HashMap::new();
    map.insert("WAVY_SESSION_DIR", "/run/user/1000/wavy");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.session_dir, PathBuf::from("/run/user/1000/wavy"));
}
