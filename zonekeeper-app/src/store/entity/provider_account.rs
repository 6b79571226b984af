//! `SeaORM` entity for the `provider_accounts` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "provider_accounts")]
/// Database row model for one credential/zone binding.
///
/// The api_key column holds the raw secret. Encrypting at rest is a
/// deployment concern; filesystem permissions are the boundary here.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owning user's chat id (`users.chat_id`).
    pub user_id: i64,
    pub email: String,
    pub api_key: String,
    pub account_id: String,
    pub zone_id: String,
    pub zone_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
