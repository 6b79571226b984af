use serde::{Deserialize, Serialize};
use zonekeeper_provider::{NewRecord, UpdateRecord, Zone};

use super::UserProfile;

/// One inbound event from the chat frontend.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub chat_id: i64,
    /// Sender profile, when the platform supplies it. Used to upsert
    /// the user record before processing.
    pub profile: Option<UserProfile>,
    pub kind: EventKind,
}

impl ChatEvent {
    #[must_use]
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            profile: None,
            kind: EventKind::Text(text.into()),
        }
    }

    #[must_use]
    pub fn select(chat_id: i64, selection: Selection) -> Self {
        Self {
            chat_id,
            profile: None,
            kind: EventKind::Select(selection),
        }
    }

    #[must_use]
    pub fn cancel(chat_id: i64) -> Self {
        Self {
            chat_id,
            profile: None,
            kind: EventKind::Cancel,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Free-form text (credential answers during onboarding).
    Text(String),
    /// A structured selection from a menu the engine previously offered.
    Select(Selection),
    /// Explicit abort of any in-flight onboarding session.
    Cancel,
}

/// A structured pick from an offered menu.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Zone choice during onboarding, by zone id.
    Zone(String),
    /// Top-level menu action.
    Menu(MenuAction),
}

/// Actions available outside of an onboarding session. Record mutations
/// carry their full payload so the engine stays stateless between them.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Begin (or restart) credential onboarding.
    AddAccount,
    /// Export all records of the active zone as a JSON document.
    ExportRecords,
    /// Create a record in the active zone.
    AddRecord(NewRecord),
    /// Replace a record in the active zone.
    EditRecord {
        record_id: String,
        record: UpdateRecord,
    },
    /// Delete a record from the active zone.
    RemoveRecord { record_id: String },
    /// Make another stored zone the active one.
    SwitchZone { zone_id: String },
}

/// Outbound reply to the chat frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    /// Plain text message.
    Text(String),
    /// Prompt the user to pick one of these zones.
    ZoneMenu(Vec<Zone>),
    /// A file to deliver as an attachment.
    Document { filename: String, content: String },
}

impl Reply {
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::Text(message.into())
    }
}
