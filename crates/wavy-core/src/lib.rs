pub mod app_config;
pub mod campaign;
pub mod config;
pub mod credential;
pub mod fit;
pub mod profile;
pub mod progress;

pub use app_config::{ApiPaths, AppConfig, Environment};
pub use campaign::{Campaign, EmotionalPattern, NewCampaign, SoftMatching, SpeechComplexity};
pub use config::{load_app_config, load_app_config_from_env};
pub use credential::Credential;
pub use fit::{filter_creators, score_percent, CreatorMatch, FitLevel, FitMetric};
pub use profile::{ProfileStatus, Video};
pub use progress::{is_complete, progress_percent};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
