//! `SeaORM` entities for the store schema.

pub mod provider_account;
pub mod user;
