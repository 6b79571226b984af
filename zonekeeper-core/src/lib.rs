//! Zonekeeper core library.
//!
//! Business logic for the chat-driven Cloudflare DNS manager:
//! - credential onboarding as a per-chat state machine
//! - record CRUD and zone export against the provider client
//! - the event router tying sessions, menu actions, and storage together
//!
//! Storage and the chat transport stay behind traits; the app crate
//! supplies the SQLite adapter, the transport is an external collaborator.

pub mod engine;
pub mod error;
pub mod messages;
pub mod services;
pub mod session;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use engine::Engine;
pub use error::{CoreError, CoreResult};
pub use services::{ClientFactory, CredentialValidator, RecordExporter, RecordService};
pub use session::{OnboardingSession, SessionManager, SessionState};
pub use traits::AccountStore;
pub use types::{
    ChatEvent, EventKind, ExportDocument, MenuAction, NewProviderAccount, NewUser,
    ProviderAccount, Reply, Selection, User, UserProfile,
};
