//! Bearer-token lifecycle: acquire from the login redirect, persist to
//! session storage, attach to requests, and clear on logout.
//!
//! Storage and navigation are injected ([`TokenStore`], [`Navigator`]) so the
//! same logic runs against a browser-like session, the CLI's session
//! directory, or test doubles. Storage failures never escape this module: a
//! blocked store degrades to "not logged in across reloads".

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use wavy_core::Credential;

use crate::client::ApiClient;
use crate::error::{ClientError, StoreError};
use crate::nav::Navigator;

/// Query parameter and storage key carrying the credential.
pub const TOKEN_KEY: &str = "access_token";

/// Session-scoped key-value storage.
pub trait TokenStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Lives as long as the value does, like a browser tab's
/// session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one file per key. The CLI points this at a
/// per-session directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(StoreError::Unavailable(format!("unsupported key \"{key}\"")));
        }
        Ok(self.dir.join(key))
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value.trim_end_matches('\n').to_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads the token from a location's query string. Pure.
#[must_use]
pub fn token_from_url(url: &Url) -> Option<Credential> {
    url.query_pairs()
        .find(|(k, _)| k == TOKEN_KEY)
        .and_then(|(_, v)| Credential::new(v.into_owned()))
}

/// Returns `url` with the token parameter removed. Other query pairs are kept
/// in order; the fragment is dropped and an empty query leaves no `?`.
#[must_use]
pub fn scrub_token(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != TOKEN_KEY)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut scrubbed = url.clone();
    scrubbed.set_fragment(None);
    if remaining.is_empty() {
        scrubbed.set_query(None);
    } else {
        scrubbed.query_pairs_mut().clear().extend_pairs(remaining);
    }
    scrubbed
}

/// Takes the token out of the current location.
///
/// When a token is present the address is rewritten in place with
/// [`Navigator::replace_url`], so back navigation is unaffected. Without a
/// token the location is left untouched.
pub fn extract_and_scrub_token_from_location(nav: &dyn Navigator) -> Option<Credential> {
    let current = nav.current_url();
    let token = token_from_url(&current)?;
    nav.replace_url(scrub_token(&current));
    Some(token)
}

/// A URL-supplied token always wins over a stored one.
#[must_use]
pub fn choose_token(from_url: Option<Credential>, stored: Option<Credential>) -> Option<Credential> {
    from_url.or(stored)
}

/// Headers authorizing a request with `token`.
///
/// Empty for `None`. For `Some`, exactly one `Authorization: Bearer <token>`
/// header marked sensitive. A token containing bytes that cannot appear in a
/// header value yields an empty map.
#[must_use]
pub fn auth_headers(token: Option<&Credential>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(token) = token else {
        return headers;
    };
    match HeaderValue::from_str(&format!("Bearer {}", token.as_str())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => {
            tracing::warn!("credential contains characters not allowed in a header; sending unauthenticated");
        }
    }
    headers
}

/// Result of a fire-and-forget backend notification.
///
/// Deliberately not `#[must_use]`: dropping it is the normal case. Callers
/// that care can inspect [`BestEffort::error`].
#[derive(Debug)]
pub struct BestEffort(Option<ClientError>);

impl BestEffort {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ClientError> {
        self.0.as_ref()
    }

    /// # Errors
    ///
    /// Returns the swallowed notification error, if any.
    pub fn into_result(self) -> Result<(), ClientError> {
        self.0.map_or(Ok(()), Err)
    }
}

impl From<Result<(), ClientError>> for BestEffort {
    fn from(result: Result<(), ClientError>) -> Self {
        Self(result.err())
    }
}

/// Owns the current credential's persistence.
pub struct TokenManager<S> {
    store: S,
}

impl<S: TokenStore> TokenManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the credential for this page.
    ///
    /// A token in the location is persisted, scrubbed from the address, and
    /// returned. Otherwise the stored token is returned, or `None`.
    pub fn resolve_token(&self, nav: &dyn Navigator) -> Option<Credential> {
        let from_url = extract_and_scrub_token_from_location(nav);
        if let Some(token) = &from_url {
            self.persist(token);
        }
        let stored = if from_url.is_some() { None } else { self.stored() };
        choose_token(from_url, stored)
    }

    /// Reads the persisted credential. Storage failures read as `None`.
    pub fn stored(&self) -> Option<Credential> {
        match self.store.get(TOKEN_KEY) {
            Ok(value) => value.and_then(Credential::new),
            Err(e) => {
                tracing::debug!(error = %e, "session storage read failed");
                None
            }
        }
    }

    /// Writes the credential. Storage failures are logged and dropped.
    pub fn persist(&self, token: &Credential) {
        if let Err(e) = self.store.set(TOKEN_KEY, token.as_str()) {
            tracing::debug!(error = %e, "session storage write failed; token not persisted");
        }
    }

    /// Removes the credential. Storage failures are logged and dropped.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            tracing::debug!(error = %e, "session storage remove failed");
        }
    }

    /// Logs out locally, then tells the backend.
    ///
    /// Storage is cleared before the network call, so the client is logged
    /// out even if the backend never hears about it.
    pub async fn logout(&self, client: &ApiClient, token: Option<&Credential>) -> BestEffort {
        self.clear();
        let outcome = BestEffort::from(client.notify_logout(token).await);
        if let Some(e) = outcome.error() {
            tracing::debug!(error = %e, "logout notification failed");
        }
        outcome
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
