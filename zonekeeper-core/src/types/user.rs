use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Profile data carried by inbound chat events.
///
/// Everything except the chat id is optional; the chat platform may
/// withhold any of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Human-readable display name: first/last name joined, falling
    /// back to the username.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if !parts.is_empty() {
            return Some(parts.join(" "));
        }
        self.username.clone().filter(|u| !u.is_empty())
    }
}

/// A stored chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Display name with the chat id as the terminal fallback.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.profile()
            .display_name()
            .unwrap_or_else(|| self.chat_id.to_string())
    }
}

/// Parameters for upserting a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn from_profile(chat_id: i64, profile: &UserProfile) -> Self {
        Self {
            chat_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let profile = UserProfile {
            username: Some("alice".into()),
            first_name: Some("Alice".into()),
            last_name: Some("Smith".into()),
        };
        assert_eq!(profile.display_name().as_deref(), Some("Alice Smith"));

        let first_only = UserProfile {
            username: None,
            first_name: Some("Alice".into()),
            last_name: None,
        };
        assert_eq!(first_only.display_name().as_deref(), Some("Alice"));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let profile = UserProfile {
            username: Some("alice".into()),
            first_name: None,
            last_name: None,
        };
        assert_eq!(profile.display_name().as_deref(), Some("alice"));
    }

    #[test]
    fn user_display_name_falls_back_to_chat_id() {
        let user = User {
            chat_id: 42,
            username: None,
            first_name: None,
            last_name: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        };
        assert_eq!(user.display_name(), "42");
    }
}
