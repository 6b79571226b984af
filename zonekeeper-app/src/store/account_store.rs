//! `AccountStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use zonekeeper_provider::SecretKey;

use zonekeeper_core::types::{NewProviderAccount, NewUser, ProviderAccount, User};
use zonekeeper_core::{AccountStore, CoreError, CoreResult};

use super::entity::{provider_account, user};
use super::{format_ts, parse_ts, SqliteStore};

impl user::Model {
    fn into_user(self) -> CoreResult<User> {
        Ok(User {
            chat_id: self.chat_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

impl provider_account::Model {
    fn into_account(self) -> CoreResult<ProviderAccount> {
        Ok(ProviderAccount {
            id: i64::from(self.id),
            user_id: self.user_id,
            email: self.email,
            api_key: SecretKey::from(self.api_key),
            account_id: self.account_id,
            zone_id: self.zone_id,
            zone_name: self.zone_name,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

fn storage_err(context: &str, e: impl std::fmt::Display) -> CoreError {
    CoreError::Storage(format!("{context}: {e}"))
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn save_user(&self, new_user: &NewUser) -> CoreResult<User> {
        let now = format_ts(chrono::Utc::now().naive_utc());
        let active = user::ActiveModel {
            chat_id: Set(new_user.chat_id),
            username: Set(new_user.username.clone()),
            first_name: Set(new_user.first_name.clone()),
            last_name: Set(new_user.last_name.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        user::Entity::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(user::Column::ChatId)
                    .update_columns([
                        user::Column::Username,
                        user::Column::FirstName,
                        user::Column::LastName,
                        user::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| storage_err("failed to save user", e))?;

        let row = user::Entity::find()
            .filter(user::Column::ChatId.eq(new_user.chat_id))
            .one(&self.db)
            .await
            .map_err(|e| storage_err("failed to read back user", e))?
            .ok_or_else(|| CoreError::Storage("user vanished after upsert".to_string()))?;
        row.into_user()
    }

    async fn user_exists(&self, chat_id: i64) -> CoreResult<bool> {
        let row = user::Entity::find()
            .filter(user::Column::ChatId.eq(chat_id))
            .one(&self.db)
            .await
            .map_err(|e| storage_err("failed to query user", e))?;
        Ok(row.is_some())
    }

    async fn get_user(&self, chat_id: i64) -> CoreResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::ChatId.eq(chat_id))
            .one(&self.db)
            .await
            .map_err(|e| storage_err("failed to query user", e))?;
        row.map(user::Model::into_user).transpose()
    }

    async fn create_account(&self, account: &NewProviderAccount) -> CoreResult<ProviderAccount> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| storage_err("failed to open transaction", e))?;

        let existing = provider_account::Entity::find()
            .filter(provider_account::Column::UserId.eq(account.user_id))
            .filter(provider_account::Column::ZoneId.eq(account.zone_id.clone()))
            .one(&txn)
            .await
            .map_err(|e| storage_err("failed to check for duplicate zone", e))?;
        if existing.is_some() {
            return Err(CoreError::DuplicateZone {
                zone_id: account.zone_id.clone(),
            });
        }

        let now = format_ts(chrono::Utc::now().naive_utc());
        let active = provider_account::ActiveModel {
            user_id: Set(account.user_id),
            email: Set(account.email.clone()),
            api_key: Set(account.api_key.expose().to_string()),
            account_id: Set(account.account_id.clone()),
            zone_id: Set(account.zone_id.clone()),
            zone_name: Set(account.zone_name.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let result = provider_account::Entity::insert(active)
            .exec(&txn)
            .await
            .map_err(|e| {
                // The unique index is the authority under concurrency.
                if e.to_string().contains("UNIQUE constraint failed") {
                    CoreError::DuplicateZone {
                        zone_id: account.zone_id.clone(),
                    }
                } else {
                    storage_err("failed to insert account", e)
                }
            })?;

        txn.commit()
            .await
            .map_err(|e| storage_err("failed to commit account", e))?;

        let ts = parse_ts(&now)?;
        Ok(ProviderAccount {
            id: i64::from(result.last_insert_id),
            user_id: account.user_id,
            email: account.email.clone(),
            api_key: account.api_key.clone(),
            account_id: account.account_id.clone(),
            zone_id: account.zone_id.clone(),
            zone_name: account.zone_name.clone(),
            created_at: ts,
            updated_at: ts,
        })
    }

    async fn list_accounts(&self, user_id: i64) -> CoreResult<Vec<ProviderAccount>> {
        let rows = provider_account::Entity::find()
            .filter(provider_account::Column::UserId.eq(user_id))
            .order_by_desc(provider_account::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| storage_err("failed to query accounts", e))?;
        rows.into_iter()
            .map(provider_account::Model::into_account)
            .collect()
    }

    async fn get_active_account(&self, user_id: i64) -> CoreResult<Option<ProviderAccount>> {
        let row = provider_account::Entity::find()
            .filter(provider_account::Column::UserId.eq(user_id))
            .order_by_desc(provider_account::Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| storage_err("failed to query active account", e))?;
        row.map(provider_account::Model::into_account).transpose()
    }

    async fn switch_active_zone(
        &self,
        user_id: i64,
        zone_id: &str,
    ) -> CoreResult<ProviderAccount> {
        let row = provider_account::Entity::find()
            .filter(provider_account::Column::UserId.eq(user_id))
            .filter(provider_account::Column::ZoneId.eq(zone_id))
            .one(&self.db)
            .await
            .map_err(|e| storage_err("failed to query account", e))?
            .ok_or(CoreError::AccountNotFound(user_id))?;

        let now = format_ts(chrono::Utc::now().naive_utc());
        let active = provider_account::ActiveModel {
            id: Set(row.id),
            updated_at: Set(now),
            ..Default::default()
        };
        let updated = sea_orm::ActiveModelTrait::update(active, &self.db)
            .await
            .map_err(|e| storage_err("failed to switch active zone", e))?;
        updated.into_account()
    }
}
