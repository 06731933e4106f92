//! HTTP client for the Wavy backend REST API.
//!
//! Wraps `reqwest` with bearer-token propagation and typed status handling.
//! Every call maps HTTP 401 to [`ClientError::Unauthorized`] so callers can
//! end the session, and any other non-2xx status to
//! [`ClientError::UnexpectedStatus`] with the response text attached.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use wavy_core::{ApiPaths, AppConfig, Credential, ProfileStatus};

use crate::error::ClientError;
use crate::token::auth_headers;

/// Client for the Wavy backend.
///
/// Use [`ApiClient::new`] with loaded configuration, or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    paths: ApiPaths,
}

impl ApiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if the configured
    /// base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.api_paths.clone(),
        )
    }

    /// Creates a client with an explicit base URL and endpoint paths.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        paths: ApiPaths,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Paths are appended textually so a base URL with its own path prefix
        // keeps that prefix.
        let normalised = base_url.trim_end_matches('/').to_owned();
        Url::parse(&normalised).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: normalised,
            paths,
        })
    }

    #[must_use]
    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    /// Fetches the creator's videos together with the profile fields the
    /// backend sends alongside them.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on HTTP 401.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a profile object.
    pub async fn get_videos(&self, token: &Credential) -> Result<ProfileStatus, ClientError> {
        self.get_json(&self.paths.videos, Some(token), "videos")
            .await
    }

    /// Fetches the processing-progress snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_videos`].
    pub async fn get_profile(&self, token: &Credential) -> Result<ProfileStatus, ClientError> {
        self.get_json(&self.paths.profile, Some(token), "profile")
            .await
    }

    /// Tells the backend the session is over. The response body is ignored.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on HTTP 401.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    pub async fn notify_logout(&self, token: Option<&Credential>) -> Result<(), ClientError> {
        let url = self.endpoint(&self.paths.logout)?;
        let request = self.client.get(url.clone()).headers(auth_headers(token));
        self.send(request, &url).await?;
        Ok(())
    }

    /// Exchanges an OAuth access token for a backend session.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on HTTP 401.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    pub async fn login_with_token(&self, token: &Credential) -> Result<(), ClientError> {
        let url = self.endpoint(&self.paths.login_with_token)?;
        let body = serde_json::json!({ "access_token": token.as_str() });
        let request = self
            .client
            .post(url.clone())
            .headers(auth_headers(Some(token)))
            .json(&body);
        self.send(request, &url).await?;
        Ok(())
    }

    /// URL that starts the TikTok OAuth flow. The backend redirects back to
    /// `redirect_uri` with `access_token` in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the configured path does not
    /// form a valid URL.
    pub fn tiktok_login_url(&self, redirect_uri: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint(&self.paths.tiktok_login)?;
        url.query_pairs_mut().append_pair("redirect_uri", redirect_uri);
        Ok(url)
    }

    /// Joins a configured path onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Sends an authenticated GET and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&Credential>,
        context: &str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let request = self.client.get(url.clone()).headers(auth_headers(token));
        let response = self.send(request, &url).await?;
        let body = response.text().await?;
        decode(&body, context)
    }

    /// Sends `request` and maps the status line to typed errors.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] on 401,
    /// [`ClientError::UnexpectedStatus`] on any other non-2xx status, and
    /// [`ClientError::Http`] on network failure.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized {
                url: strip_query(url),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: strip_query(url),
                body,
            });
        }

        Ok(response)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Renders `url` without its query so error messages never carry tokens or
/// redirect parameters.
fn strip_query(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
