//! Operator-facing message catalog.
//!
//! Every error the engine can surface maps to exactly one message here,
//! so wording stays consistent across the session and menu paths. Raw
//! secrets never appear; provider errors already arrive masked.

use crate::error::CoreError;

pub const PROMPT_EMAIL: &str =
    "Let's add a Cloudflare account. What's the account email address?";
pub const PROMPT_SECRET_KEY: &str =
    "Got it. Now send the Global API Key for that account.";
pub const PROMPT_ACCOUNT_ID: &str =
    "Thanks. Finally, what's the Account ID? You can find it on the Cloudflare dashboard.";
pub const PROMPT_ZONE_CHOICE: &str = "Credentials verified. Pick the zone to manage:";
pub const ZONE_NOT_IN_MENU: &str =
    "That zone isn't on the menu. Please pick one of the listed zones.";
pub const NO_ZONES: &str =
    "The credentials check out, but that account has no zones to manage. Session closed.";
pub const VALIDATION_TRANSIENT: &str =
    "Cloudflare couldn't be reached just now. Send the Account ID again to retry.";
pub const COMMIT_RETRY: &str =
    "Saving the account failed. Send any message to retry.";
pub const SESSION_CANCELLED: &str = "Okay, cancelled. Nothing was saved.";
pub const NOT_REGISTERED: &str =
    "I don't know you yet. Send a message from your chat account first so I can register you.";
pub const NO_ACCOUNT: &str =
    "No Cloudflare account is set up yet. Use \"add account\" to onboard one.";
pub const SESSION_EXPIRED: &str =
    "That session expired from inactivity. Start again when ready.";
pub const MENU_HINT: &str =
    "Pick an action from the menu: add account, export records, or manage records.";
pub const UNKNOWN_ZONE: &str = "You don't manage a zone with that ID.";

/// One human-readable line per error kind. Secrets are already masked
/// upstream, so the provider's Display output is safe to show.
#[must_use]
pub fn describe_error(err: &CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg.clone(),
        CoreError::NoZones => NO_ZONES.to_string(),
        CoreError::AccountNotFound(_) => NO_ACCOUNT.to_string(),
        CoreError::DuplicateZone { zone_id } => {
            format!("You already manage zone {zone_id}. Session closed.")
        }
        CoreError::SessionExpired => SESSION_EXPIRED.to_string(),
        CoreError::Storage(_) => {
            "Something went wrong saving your data. Please try again.".to_string()
        }
        CoreError::Serialization(_) => {
            "Couldn't prepare the export file. Please try again.".to_string()
        }
        CoreError::Provider(e) => {
            if e.is_retryable() {
                "Cloudflare couldn't be reached just now. Please try again.".to_string()
            } else {
                format!("Cloudflare rejected the request: {e}")
            }
        }
    }
}
