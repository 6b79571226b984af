//! Core domain types.

mod account;
mod event;
mod export;
mod user;

pub use account::{NewProviderAccount, ProviderAccount};
pub use event::{ChatEvent, EventKind, MenuAction, Reply, Selection};
pub use export::{ExportDocument, ExportInfo, ExportRecord, ZoneInfo};
pub use user::{NewUser, User, UserProfile};
