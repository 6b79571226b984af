//! Event router: the single entry point for the chat transport.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::messages;
use crate::services::{export_filename, ClientFactory, RecordService};
use crate::session::{OnboardingSession, SessionManager};
use crate::traits::AccountStore;
use crate::types::{
    ChatEvent, EventKind, MenuAction, NewUser, ProviderAccount, Reply, Selection, User,
};

/// Routes chat events to the open session or the menu actions.
///
/// Replies are the only output; every error becomes a message, never a
/// panic or a dropped event.
pub struct Engine {
    store: Arc<dyn AccountStore>,
    factory: Arc<dyn ClientFactory>,
    sessions: SessionManager,
}

impl Engine {
    #[must_use]
    pub fn new(
        store: Arc<dyn AccountStore>,
        factory: Arc<dyn ClientFactory>,
        session_timeout: Duration,
    ) -> Self {
        Self {
            store,
            factory,
            sessions: SessionManager::new(session_timeout),
        }
    }

    /// Session registry, exposed so the host can run a periodic
    /// `sweep_expired` and notify the affected chats.
    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn handle_event(&self, event: ChatEvent) -> Vec<Reply> {
        let chat_id = event.chat_id;

        // Refresh the user record whenever the platform sends profile
        // data along.
        if let Some(profile) = &event.profile {
            if let Err(err) = self
                .store
                .save_user(&NewUser::from_profile(chat_id, profile))
                .await
            {
                error!("failed to upsert user {chat_id}: {err}");
                return vec![Reply::text(messages::describe_error(&err))];
            }
        }

        // Asking to add an account always starts over, even mid-session.
        if let EventKind::Select(Selection::Menu(MenuAction::AddAccount)) = &event.kind {
            return self.dispatch_menu(chat_id, MenuAction::AddAccount).await;
        }

        if let Some(session) = self.sessions.get(chat_id).await {
            let mut guard = session.lock().await;
            if guard.is_expired() {
                guard.expire();
                drop(guard);
                self.sessions.remove(chat_id).await;
                let mut replies = vec![Reply::text(messages::SESSION_EXPIRED)];
                // Menu picks still mean something without a session;
                // bare text was an answer to a prompt that is gone.
                if let EventKind::Select(Selection::Menu(action)) = event.kind {
                    replies.extend(self.dispatch_menu(chat_id, action).await);
                }
                return replies;
            }
            let replies = guard.advance(&event.kind, &*self.factory, &*self.store).await;
            let done = guard.state().is_terminal();
            drop(guard);
            if done {
                self.sessions.remove(chat_id).await;
            }
            return replies;
        }

        match event.kind {
            EventKind::Cancel => vec![Reply::text("Nothing to cancel.")],
            EventKind::Text(_) | EventKind::Select(Selection::Zone(_)) => {
                vec![Reply::text(messages::MENU_HINT)]
            }
            EventKind::Select(Selection::Menu(action)) => self.dispatch_menu(chat_id, action).await,
        }
    }

    async fn dispatch_menu(&self, chat_id: i64, action: MenuAction) -> Vec<Reply> {
        let user = match self.require_user(chat_id).await {
            Ok(user) => user,
            Err(reply) => return vec![reply],
        };

        // Starting onboarding is the one action that needs no stored
        // account, so it is answered before the account lookup.
        if let MenuAction::AddAccount = action {
            return self.start_onboarding(chat_id).await;
        }

        let account = match self.require_account(chat_id).await {
            Ok(account) => account,
            Err(reply) => return vec![reply],
        };
        let result = match action {
            MenuAction::AddAccount => Ok(self.start_onboarding(chat_id).await),
            MenuAction::ExportRecords => self.export_records(&account, &user).await,
            MenuAction::AddRecord(record) => {
                let service = RecordService::new(&*self.factory);
                service.add_record(&account, &record).await.map(|created| {
                    vec![Reply::text(format!(
                        "Created {} record {} ({}).",
                        created.record_type, created.name, created.id
                    ))]
                })
            }
            MenuAction::EditRecord { record_id, record } => {
                let service = RecordService::new(&*self.factory);
                service
                    .edit_record(&account, &record_id, &record)
                    .await
                    .map(|updated| {
                        vec![Reply::text(format!(
                            "Updated {} record {} ({}).",
                            updated.record_type, updated.name, updated.id
                        ))]
                    })
            }
            MenuAction::RemoveRecord { record_id } => {
                let service = RecordService::new(&*self.factory);
                service
                    .remove_record(&account, &record_id)
                    .await
                    .map(|()| vec![Reply::text(format!("Record {record_id} deleted."))])
            }
            MenuAction::SwitchZone { zone_id } => self
                .store
                .switch_active_zone(chat_id, &zone_id)
                .await
                .map(|switched| {
                    vec![Reply::text(format!(
                        "Active zone is now {}.",
                        switched.zone_name
                    ))]
                })
                .map_err(|err| match err {
                    CoreError::AccountNotFound(_) => {
                        CoreError::Validation(messages::UNKNOWN_ZONE.to_string())
                    }
                    other => other,
                }),
        };
        result.unwrap_or_else(|err| {
            if err.is_expected() {
                warn!("menu action failed for chat {chat_id}: {err}");
            } else {
                error!("menu action failed for chat {chat_id}: {err}");
            }
            vec![Reply::text(messages::describe_error(&err))]
        })
    }

    async fn start_onboarding(&self, chat_id: i64) -> Vec<Reply> {
        self.sessions.begin(chat_id).await;
        info!("chat {chat_id} started onboarding");
        vec![OnboardingSession::greeting()]
    }

    async fn export_records(
        &self,
        account: &ProviderAccount,
        user: &User,
    ) -> CoreResult<Vec<Reply>> {
        let service = RecordService::new(&*self.factory);
        let document = service.export_zone(account, user).await?;
        let filename = export_filename(&account.zone_name, document.export_info.exported_at);
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        Ok(vec![Reply::Document { filename, content }])
    }

    async fn require_user(&self, chat_id: i64) -> Result<User, Reply> {
        match self.store.get_user(chat_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Reply::text(messages::NOT_REGISTERED)),
            Err(err) => {
                error!("user lookup failed for chat {chat_id}: {err}");
                Err(Reply::text(messages::describe_error(&err)))
            }
        }
    }

    async fn require_account(&self, chat_id: i64) -> Result<ProviderAccount, Reply> {
        match self.store.get_active_account(chat_id).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(Reply::text(messages::NO_ACCOUNT)),
            Err(err) => {
                error!("account lookup failed for chat {chat_id}: {err}");
                Err(Reply::text(messages::describe_error(&err)))
            }
        }
    }
}
