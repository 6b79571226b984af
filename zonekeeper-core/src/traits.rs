//! Storage abstraction implemented by the app layer.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{NewProviderAccount, NewUser, ProviderAccount, User};

/// Persistence seam for users and their provider accounts.
///
/// Implementations must treat `save_user` as an upsert keyed by chat id
/// and must reject a second account for the same `(user_id, zone_id)`
/// pair with [`CoreError::DuplicateZone`](crate::CoreError::DuplicateZone).
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert or refresh a user record, returning the stored row.
    async fn save_user(&self, user: &NewUser) -> CoreResult<User>;

    /// Whether a user record exists for this chat id.
    async fn user_exists(&self, chat_id: i64) -> CoreResult<bool>;

    /// Fetch a user by chat id.
    async fn get_user(&self, chat_id: i64) -> CoreResult<Option<User>>;

    /// Persist a newly onboarded account.
    async fn create_account(&self, account: &NewProviderAccount) -> CoreResult<ProviderAccount>;

    /// All accounts owned by a user, most recently updated first.
    async fn list_accounts(&self, user_id: i64) -> CoreResult<Vec<ProviderAccount>>;

    /// The user's active account: the most recently updated one, or
    /// `None` when the user has no accounts.
    async fn get_active_account(&self, user_id: i64) -> CoreResult<Option<ProviderAccount>>;

    /// Make the account bound to `zone_id` the active one by touching
    /// its `updated_at`. Returns the switched-to account.
    async fn switch_active_zone(&self, user_id: i64, zone_id: &str)
        -> CoreResult<ProviderAccount>;
}
