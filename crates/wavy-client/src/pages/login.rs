use reqwest::Url;

use super::{PageError, PageSettings};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::nav::Navigator;
use crate::token::{token_from_url, TokenManager, TokenStore};

/// Query parameter on the callback URL naming where to go afterwards.
const REDIRECT_PARAM: &str = "redirect_uri";

/// Skips the login page when a stored credential still works.
///
/// Returns `true` after replacing the location with the dashboard. Any
/// failure, including a missing credential, leaves the user on the login
/// page.
pub async fn check_existing_session<S: TokenStore>(
    client: &ApiClient,
    tokens: &TokenManager<S>,
    nav: &dyn Navigator,
    settings: &PageSettings,
) -> bool {
    let Some(token) = tokens.stored() else {
        return false;
    };
    if let Err(e) = client.get_videos(&token).await {
        tracing::debug!(error = %e, "stored credential not accepted; staying on login");
        return false;
    }
    match nav.current_url().join(&settings.dashboard_path) {
        Ok(dashboard) => {
            nav.replace_url(dashboard);
            true
        }
        Err(e) => {
            tracing::warn!(path = %settings.dashboard_path, error = %e, "invalid dashboard path");
            false
        }
    }
}

/// OAuth start URL whose redirect comes back to this origin's callback page.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] if the login endpoint does not form a
/// valid URL.
pub fn login_url(
    client: &ApiClient,
    nav: &dyn Navigator,
    settings: &PageSettings,
) -> Result<Url, ClientError> {
    let origin = nav.current_url().origin().ascii_serialization();
    client.tiktok_login_url(&format!("{origin}{}", settings.callback_path))
}

/// Finishes the OAuth redirect.
///
/// Reads the token from the callback location, hands it to the backend to
/// establish a session, persists it, and replaces the location with the
/// `redirect_uri` parameter (or the dashboard). Returns the new location.
///
/// # Errors
///
/// - [`PageError::MissingCallbackToken`] if the location has no token.
/// - [`PageError::SessionCreation`] if the backend rejects the exchange.
/// - [`PageError::InvalidTarget`] if the redirect target is not a valid
///   same-origin URL.
pub async fn complete_callback<S: TokenStore>(
    client: &ApiClient,
    tokens: &TokenManager<S>,
    nav: &dyn Navigator,
    settings: &PageSettings,
) -> Result<Url, PageError> {
    let current = nav.current_url();
    let token = token_from_url(&current).ok_or(PageError::MissingCallbackToken)?;
    let redirect = current
        .query_pairs()
        .find(|(k, _)| k == REDIRECT_PARAM)
        .map_or_else(|| settings.dashboard_path.clone(), |(_, v)| v.into_owned());

    client
        .login_with_token(&token)
        .await
        .map_err(PageError::SessionCreation)?;
    tokens.persist(&token);

    // Only same-origin targets are followed.
    let target = match current.join(&redirect) {
        Ok(target) if target.origin() == current.origin() => target,
        _ => return Err(PageError::InvalidTarget { target: redirect }),
    };
    tracing::info!(target = %target.path(), "session created");
    nav.replace_url(target.clone());
    Ok(target)
}
