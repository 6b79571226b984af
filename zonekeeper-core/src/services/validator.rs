//! Credential format checks and live verification against the provider.

use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;
use zonekeeper_provider::{CloudflareCredentials, SecretKey, Zone};

use super::ClientFactory;
use crate::error::{CoreError, CoreResult};

#[allow(clippy::expect_used)] // static pattern, cannot fail
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

/// Result of a successful live verification.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Zones the verified account can manage, in provider order.
    pub zones: Vec<Zone>,
}

/// Validates operator-supplied credentials, first by shape and then by
/// calling the provider.
pub struct CredentialValidator;

impl CredentialValidator {
    /// Normalize and check an email address. Returns the trimmed value.
    pub fn check_email(input: &str) -> CoreResult<String> {
        let email = input.trim();
        if email.is_empty() || !email_regex().is_match(email) {
            return Err(CoreError::Validation(
                "That doesn't look like a valid email address. Please try again.".to_string(),
            ));
        }
        Ok(email.to_string())
    }

    /// Normalize and check a Global API Key. Returns the wrapped secret.
    pub fn check_secret_key(input: &str) -> CoreResult<SecretKey> {
        let key = input.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(CoreError::Validation(
                "The API key can't be empty or contain spaces. Please try again.".to_string(),
            ));
        }
        Ok(SecretKey::from(key))
    }

    /// Normalize and check an account id. Returns the trimmed value.
    pub fn check_account_id(input: &str) -> CoreResult<String> {
        let account_id = input.trim();
        if account_id.is_empty() || account_id.contains(char::is_whitespace) {
            return Err(CoreError::Validation(
                "The account ID can't be empty or contain spaces. Please try again.".to_string(),
            ));
        }
        Ok(account_id.to_string())
    }

    /// Verify credentials against the live API and collect the zones
    /// they can manage. An authenticated account with zero zones is an
    /// error of its own kind, distinct from bad credentials.
    pub async fn verify(
        factory: &dyn ClientFactory,
        credentials: CloudflareCredentials,
    ) -> CoreResult<ValidationOutcome> {
        let email = credentials.email.clone();
        let client = factory.make_client(credentials);
        client.verify_credentials().await?;
        let zones = client.list_zones().await?;
        if zones.is_empty() {
            warn!("credentials for {email} verified but account has no zones");
            return Err(CoreError::NoZones);
        }
        info!("credentials for {email} verified, {} zone(s) found", zones.len());
        Ok(ValidationOutcome { zones })
    }
}
