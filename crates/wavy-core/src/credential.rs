//! The bearer credential carried by every authenticated request.

/// An opaque bearer token.
///
/// The value is never interpreted. `Debug` is redacted so a credential can sit
/// inside structs that get logged.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wraps `raw` as a credential. Returns `None` for an empty string, which
    /// the login redirect uses to mean "no token".
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([redacted])")
    }
}
