//! Opaque secret-key wrapper.

use serde::{Deserialize, Serialize};

use crate::util::mask_secret;

/// A provider secret key (Cloudflare Global API Key).
///
/// `Debug` and `Display` render the masked form (`<first4>...<last4>`)
/// so the raw value can never leak through logging or error formatting.
/// Code that actually needs the raw value (request signing, persistence)
/// must call [`expose`](Self::expose) explicitly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw secret value. Callers own the responsibility of not
    /// logging or displaying it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs and chat-facing text.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey({})", self.masked())
    }
}

impl std::fmt::Display for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SecretKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
