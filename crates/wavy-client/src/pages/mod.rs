//! Page controllers: what each dashboard page does on mount, on user action,
//! and on teardown. Rendering is left to the caller.

mod brand;
mod creator;
mod login;

use std::time::Duration;

use thiserror::Error;
use wavy_core::{AppConfig, Credential};

use crate::client::ApiClient;
use crate::error::{ClientError, PollerError};
use crate::nav::Navigator;
use crate::token::{BestEffort, TokenManager, TokenStore};

pub use brand::{BrandDashboard, BrandView};
pub use creator::{CreatorDashboard, CreatorView};
pub use login::{check_existing_session, complete_callback, login_url};

/// Navigation targets and timings shared by all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub login_path: String,
    pub dashboard_path: String,
    pub callback_path: String,
    pub poll_interval: Duration,
}

impl PageSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
            callback_path: "/callback".to_owned(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Outcome of mounting a page that needs a credential.
#[derive(Debug)]
pub enum Mount<P> {
    Ready(P),
    /// No usable credential; the navigator has been sent to the login page.
    RedirectedToLogin,
}

impl<P> Mount<P> {
    #[must_use]
    pub fn ready(self) -> Option<P> {
        match self {
            Mount::Ready(page) => Some(page),
            Mount::RedirectedToLogin => None,
        }
    }
}

/// Failures a page reports to the user.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Create campaign failed: {status} {body}")]
    CreateCampaignFailed { status: u16, body: String },

    #[error("Create campaign error: {0}")]
    CreateCampaign(#[source] ClientError),

    #[error("No access token found in callback URL")]
    MissingCallbackToken,

    #[error("Failed to create session with backend: {0}")]
    SessionCreation(#[source] ClientError),

    #[error("invalid navigation target \"{target}\"")]
    InvalidTarget { target: String },

    /// The backend rejected the credential; the navigator has been sent to
    /// the login page.
    #[error("session expired; please log in again")]
    Unauthorized,

    #[error(transparent)]
    Poller(#[from] PollerError),
}

/// Clears the session, notifies the backend, and goes to the login page.
/// Navigation happens regardless of the notification outcome.
pub(crate) async fn log_out<S: TokenStore>(
    client: &ApiClient,
    tokens: &TokenManager<S>,
    nav: &dyn Navigator,
    token: Option<&Credential>,
    login_path: &str,
) -> BestEffort {
    let outcome = tokens.logout(client, token).await;
    nav.push(login_path);
    outcome
}
