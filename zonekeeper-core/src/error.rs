//! Unified error type definition.

use thiserror::Error;

// Re-export library error type
pub use zonekeeper_provider::ProviderError;

/// Core layer error type.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed operator input; recoverable by re-prompting.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider error (converted from the client library).
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Credentials verified but the account owns no manageable zones.
    #[error("No manageable zones found for this account")]
    NoZones,

    /// No provider account stored for the user.
    #[error("No provider account found for user {0}")]
    AccountNotFound(i64),

    /// The user already owns an account for this zone.
    #[error("An account for zone {zone_id} already exists")]
    DuplicateZone { zone_id: String },

    /// Storage layer error; the triggering operation may be retried.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input arrived for a chat whose session no longer exists.
    #[error("Session expired")]
    SessionExpired,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether this is expected behavior (operator input, resource does
    /// not exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`. Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::NoZones
            | Self::AccountNotFound(_)
            | Self::DuplicateZone { .. }
            | Self::SessionExpired => true,
            Self::Provider(e) => e.is_expected(),
            Self::Storage(_) | Self::Serialization(_) => false,
        }
    }

    /// Whether the operator may simply retry the same action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_retryable(),
            Self::Storage(_) => true,
            _ => false,
        }
    }
}

/// Core layer Result type alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_expected() {
        assert!(CoreError::Validation("bad email".into()).is_expected());
        assert!(CoreError::NoZones.is_expected());
        assert!(CoreError::SessionExpired.is_expected());
    }

    #[test]
    fn storage_is_unexpected_but_retryable() {
        let e = CoreError::Storage("disk full".into());
        assert!(!e.is_expected());
        assert!(e.is_retryable());
    }

    #[test]
    fn provider_classification_passes_through() {
        let transient = CoreError::Provider(ProviderError::Timeout {
            detail: "30s".into(),
        });
        assert!(transient.is_retryable());
        assert!(!transient.is_expected());

        let auth = CoreError::Provider(ProviderError::InvalidCredentials { raw_message: None });
        assert!(!auth.is_retryable());
        assert!(auth.is_expected());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            CoreError::AccountNotFound(42).to_string(),
            "No provider account found for user 42"
        );
        assert_eq!(
            CoreError::DuplicateZone {
                zone_id: "z1".into()
            }
            .to_string(),
            "An account for zone z1 already exists"
        );
    }
}
