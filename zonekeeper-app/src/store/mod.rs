//! SQLite-backed `AccountStore` using `SeaORM`.
//!
//! One `SqliteStore` owns the database connection, runs migrations on
//! startup, and implements the core storage trait. Timestamps are kept
//! as fixed-width ISO strings so string ordering matches time ordering.

mod account_store;
pub(crate) mod entity;
mod migration;

use std::path::Path;

use chrono::NaiveDateTime;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use zonekeeper_core::{CoreError, CoreResult};

use migration::Migrator;

/// Timestamp wire format. The fixed fractional width keeps
/// lexicographic and chronological order identical, which the
/// active-account query relies on.
const TS_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub(crate) fn format_ts(ts: NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

pub(crate) fn parse_ts(raw: &str) -> CoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TS_FMT)
        .map_err(|e| CoreError::Serialization(format!("invalid timestamp {raw:?}: {e}")))
}

/// SQLite-backed store for users and provider accounts.
pub struct SqliteStore {
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path` and bring
    /// the schema up to date.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CoreError::Storage(format!("failed to create directory: {e}"))
                })?;
            }
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::Storage(format!("failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        // Schema must be current before the store is handed out.
        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::Storage(format!("failed to run migrations: {e}")))?;

        Ok(store)
    }
}
