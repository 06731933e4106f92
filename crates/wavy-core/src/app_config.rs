use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Endpoint paths on the backend, relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    pub videos: String,
    pub profile: String,
    pub campaigns: String,
    pub logout: String,
    pub login_with_token: String,
    pub tiktok_login: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            videos: "/api/v1/videos".to_owned(),
            profile: "/api/v1/profile".to_owned(),
            campaigns: "/api/v1/campaigns".to_owned(),
            logout: "/api/v1/logout".to_owned(),
            login_with_token: "/api/v1/login-with-token".to_owned(),
            tiktok_login: "/api/v1/login/tiktok".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub api_paths: ApiPaths,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub poll_interval_ms: u64,
    pub session_dir: PathBuf,
    pub login_path: String,
    pub dashboard_path: String,
}
