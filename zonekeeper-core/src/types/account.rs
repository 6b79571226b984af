use chrono::NaiveDateTime;
use zonekeeper_provider::{CloudflareCredentials, SecretKey};

/// A stored Cloudflare account binding: one credential set tied to one
/// managed zone. A user may own several, one per zone.
///
/// Deliberately not `Serialize`: the api_key would pass through serde
/// in the raw, and nothing legitimately ships this type over a wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAccount {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub api_key: SecretKey,
    pub account_id: String,
    pub zone_id: String,
    pub zone_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProviderAccount {
    /// Credentials for constructing an API client from this account.
    #[must_use]
    pub fn credentials(&self) -> CloudflareCredentials {
        CloudflareCredentials {
            email: self.email.clone(),
            api_key: self.api_key.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

/// Parameters for persisting a newly onboarded account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProviderAccount {
    pub user_id: i64,
    pub email: String,
    pub api_key: SecretKey,
    pub account_id: String,
    pub zone_id: String,
    pub zone_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_carry_account_fields() {
        let account = ProviderAccount {
            id: 1,
            user_id: 100,
            email: "ops@example.com".into(),
            api_key: SecretKey::from("0123456789abcdef"),
            account_id: "acc-1".into(),
            zone_id: "z-1".into(),
            zone_name: "example.com".into(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let creds = account.credentials();
        assert_eq!(creds.email, "ops@example.com");
        assert_eq!(creds.account_id, "acc-1");
        assert_eq!(creds.api_key.expose(), "0123456789abcdef");
    }

    #[test]
    fn debug_masks_secret() {
        let account = ProviderAccount {
            id: 1,
            user_id: 100,
            email: "ops@example.com".into(),
            api_key: SecretKey::from("0123456789abcdef"),
            account_id: "acc-1".into(),
            zone_id: "z-1".into(),
            zone_name: "example.com".into(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let rendered = format!("{account:?}");
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("0123...cdef"));
    }
}
