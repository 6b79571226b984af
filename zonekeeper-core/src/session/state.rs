//! Onboarding state machine.
//!
//! One session per chat walks the operator through email, Global API Key
//! and account id, verifies the credentials remotely, offers the zone
//! menu, and commits the chosen binding. Nothing is written to storage
//! before the commit step.

use std::time::{Duration, Instant};

use log::{info, warn};
use zonekeeper_provider::{mask_secret, CloudflareCredentials, SecretKey, Zone};

use crate::error::CoreError;
use crate::messages;
use crate::services::{ClientFactory, CredentialValidator};
use crate::traits::AccountStore;
use crate::types::{EventKind, NewProviderAccount, Reply, Selection};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingEmail,
    AwaitingSecretKey,
    AwaitingAccountId,
    Validating,
    AwaitingZoneChoice,
    Committing,
    Completed,
    Cancelled,
    TimedOut,
}

impl SessionState {
    /// Terminal states accept no further input; the manager drops the
    /// session once it reaches one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::TimedOut)
    }
}

/// A single chat's in-flight onboarding.
pub struct OnboardingSession {
    chat_id: i64,
    state: SessionState,
    email: Option<String>,
    api_key: Option<SecretKey>,
    account_id: Option<String>,
    zones: Vec<Zone>,
    chosen_zone: Option<Zone>,
    last_activity: Instant,
    timeout: Duration,
}

impl OnboardingSession {
    #[must_use]
    pub fn new(chat_id: i64, timeout: Duration) -> Self {
        Self {
            chat_id,
            state: SessionState::AwaitingEmail,
            email: None,
            api_key: None,
            account_id: None,
            zones: Vec::new(),
            chosen_zone: None,
            last_activity: Instant::now(),
            timeout,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Whether the inactivity window has elapsed. Terminal states
    /// never "expire"; they are already dead.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        !self.state.is_terminal() && self.last_activity.elapsed() >= self.timeout
    }

    /// Mark the session timed out. Side-effect-free.
    pub fn expire(&mut self) {
        if !self.state.is_terminal() {
            info!("onboarding session for chat {} timed out", self.chat_id);
            self.state = SessionState::TimedOut;
        }
    }

    /// The opening prompt sent when the session is created.
    #[must_use]
    pub fn greeting() -> Reply {
        Reply::text(messages::PROMPT_EMAIL)
    }

    /// Feed one event into the machine. Returns the replies to send;
    /// errors are folded into replies so the caller never unwinds.
    pub async fn advance(
        &mut self,
        kind: &EventKind,
        factory: &dyn ClientFactory,
        store: &dyn AccountStore,
    ) -> Vec<Reply> {
        self.last_activity = Instant::now();

        if let EventKind::Cancel = kind {
            self.state = SessionState::Cancelled;
            info!("onboarding session for chat {} cancelled", self.chat_id);
            return vec![Reply::text(messages::SESSION_CANCELLED)];
        }

        match self.state {
            SessionState::AwaitingEmail => self.on_email(kind),
            SessionState::AwaitingSecretKey => self.on_secret_key(kind),
            SessionState::AwaitingAccountId => self.on_account_id(kind, factory).await,
            SessionState::AwaitingZoneChoice => self.on_zone_choice(kind, store).await,
            // A commit that failed transiently is retried on the next
            // event, whatever that event carries.
            SessionState::Committing => self.commit(store).await,
            SessionState::Validating
            | SessionState::Completed
            | SessionState::Cancelled
            | SessionState::TimedOut => Vec::new(),
        }
    }

    fn on_email(&mut self, kind: &EventKind) -> Vec<Reply> {
        let EventKind::Text(text) = kind else {
            return vec![Reply::text(messages::PROMPT_EMAIL)];
        };
        match CredentialValidator::check_email(text) {
            Ok(email) => {
                self.email = Some(email);
                self.state = SessionState::AwaitingSecretKey;
                vec![Reply::text(messages::PROMPT_SECRET_KEY)]
            }
            Err(err) => vec![Reply::text(messages::describe_error(&err))],
        }
    }

    fn on_secret_key(&mut self, kind: &EventKind) -> Vec<Reply> {
        let EventKind::Text(text) = kind else {
            return vec![Reply::text(messages::PROMPT_SECRET_KEY)];
        };
        match CredentialValidator::check_secret_key(text) {
            Ok(key) => {
                self.api_key = Some(key);
                self.state = SessionState::AwaitingAccountId;
                vec![Reply::text(messages::PROMPT_ACCOUNT_ID)]
            }
            Err(err) => vec![Reply::text(messages::describe_error(&err))],
        }
    }

    async fn on_account_id(&mut self, kind: &EventKind, factory: &dyn ClientFactory) -> Vec<Reply> {
        let EventKind::Text(text) = kind else {
            return vec![Reply::text(messages::PROMPT_ACCOUNT_ID)];
        };
        let account_id = match CredentialValidator::check_account_id(text) {
            Ok(id) => id,
            Err(err) => return vec![Reply::text(messages::describe_error(&err))],
        };
        self.account_id = Some(account_id);
        self.state = SessionState::Validating;
        self.validate(factory).await
    }

    async fn validate(&mut self, factory: &dyn ClientFactory) -> Vec<Reply> {
        let Some(credentials) = self.credentials() else {
            // Collected fields vanished mid-flight; restart cleanly.
            self.reset_to_email();
            return vec![Reply::text(messages::PROMPT_EMAIL)];
        };
        let masked = mask_secret(credentials.api_key.expose());
        match CredentialValidator::verify(factory, credentials).await {
            Ok(outcome) => {
                self.zones = outcome.zones;
                self.state = SessionState::AwaitingZoneChoice;
                vec![
                    Reply::text(messages::PROMPT_ZONE_CHOICE),
                    Reply::ZoneMenu(self.zones.clone()),
                ]
            }
            Err(CoreError::NoZones) => {
                self.state = SessionState::Cancelled;
                vec![Reply::text(messages::NO_ZONES)]
            }
            Err(err) if err.is_retryable() => {
                // Keep everything collected; re-submitting the account
                // id retries verification.
                warn!(
                    "transient verification failure for chat {} (key {masked}): {err}",
                    self.chat_id
                );
                self.state = SessionState::AwaitingAccountId;
                vec![Reply::text(messages::VALIDATION_TRANSIENT)]
            }
            Err(err) => {
                warn!(
                    "credential verification failed for chat {} (key {masked}): {err}",
                    self.chat_id
                );
                self.reset_to_email();
                vec![
                    Reply::text(messages::describe_error(&err)),
                    Reply::text(messages::PROMPT_EMAIL),
                ]
            }
        }
    }

    async fn on_zone_choice(&mut self, kind: &EventKind, store: &dyn AccountStore) -> Vec<Reply> {
        let zone_id = match kind {
            EventKind::Select(Selection::Zone(id)) => id.clone(),
            // Typed input is matched against the menu too, by id or name.
            EventKind::Text(text) => text.trim().to_string(),
            EventKind::Select(_) | EventKind::Cancel => {
                return vec![
                    Reply::text(messages::PROMPT_ZONE_CHOICE),
                    Reply::ZoneMenu(self.zones.clone()),
                ]
            }
        };
        // Only the list captured at validation time counts.
        let Some(zone) = self
            .zones
            .iter()
            .find(|z| z.id == zone_id || z.name == zone_id)
            .cloned()
        else {
            return vec![
                Reply::text(messages::ZONE_NOT_IN_MENU),
                Reply::ZoneMenu(self.zones.clone()),
            ];
        };
        self.chosen_zone = Some(zone);
        self.state = SessionState::Committing;
        self.commit(store).await
    }

    async fn commit(&mut self, store: &dyn AccountStore) -> Vec<Reply> {
        let (Some(email), Some(api_key), Some(account_id), Some(zone)) = (
            self.email.clone(),
            self.api_key.clone(),
            self.account_id.clone(),
            self.chosen_zone.clone(),
        ) else {
            self.reset_to_email();
            return vec![Reply::text(messages::PROMPT_EMAIL)];
        };
        let new_account = NewProviderAccount {
            user_id: self.chat_id,
            email,
            api_key,
            account_id,
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
        };
        match store.create_account(&new_account).await {
            Ok(account) => {
                self.state = SessionState::Completed;
                info!(
                    "chat {} onboarded zone {} ({})",
                    self.chat_id, account.zone_name, account.zone_id
                );
                vec![Reply::text(format!(
                    "Account saved. Zone {} is now active.",
                    account.zone_name
                ))]
            }
            Err(err @ CoreError::DuplicateZone { .. }) => {
                self.state = SessionState::Cancelled;
                vec![Reply::text(messages::describe_error(&err))]
            }
            Err(err) => {
                // Validated data stays put; the next event retries.
                warn!("commit failed for chat {}: {err}", self.chat_id);
                vec![Reply::text(messages::COMMIT_RETRY)]
            }
        }
    }

    fn credentials(&self) -> Option<CloudflareCredentials> {
        Some(CloudflareCredentials {
            email: self.email.clone()?,
            api_key: self.api_key.clone()?,
            account_id: self.account_id.clone()?,
        })
    }

    fn reset_to_email(&mut self) {
        self.email = None;
        self.api_key = None;
        self.account_id = None;
        self.zones.clear();
        self.chosen_zone = None;
        self.state = SessionState::AwaitingEmail;
    }
}
