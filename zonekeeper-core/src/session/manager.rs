//! Per-chat session registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::{Mutex, RwLock};

use super::OnboardingSession;

/// Holds at most one onboarding session per chat.
///
/// The per-session `tokio::sync::Mutex` is what serializes concurrent
/// events from the same chat; events for different chats never contend.
pub struct SessionManager {
    sessions: RwLock<HashMap<i64, Arc<Mutex<OnboardingSession>>>>,
    timeout: Duration,
}

impl SessionManager {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Start a session for this chat, replacing any existing one. The
    /// replaced session just vanishes; no state was ever persisted.
    pub async fn begin(&self, chat_id: i64) -> Arc<Mutex<OnboardingSession>> {
        let session = Arc::new(Mutex::new(OnboardingSession::new(chat_id, self.timeout)));
        let previous = self
            .sessions
            .write()
            .await
            .insert(chat_id, Arc::clone(&session));
        if previous.is_some() {
            info!("chat {chat_id} restarted onboarding, replacing open session");
        }
        session
    }

    /// The chat's open session, if any. Expiry is the caller's check,
    /// under the session lock.
    pub async fn get(&self, chat_id: i64) -> Option<Arc<Mutex<OnboardingSession>>> {
        self.sessions.read().await.get(&chat_id).map(Arc::clone)
    }

    pub async fn remove(&self, chat_id: i64) {
        self.sessions.write().await.remove(&chat_id);
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every expired session, returning the affected chat ids so
    /// the host can notify them. Sessions currently processing an event
    /// are locked and skipped; they refresh their own activity clock.
    pub async fn sweep_expired(&self) -> Vec<i64> {
        let mut expired = Vec::new();
        {
            let sessions = self.sessions.read().await;
            for (chat_id, session) in sessions.iter() {
                if let Ok(mut guard) = session.try_lock() {
                    if guard.is_expired() {
                        guard.expire();
                        expired.push(*chat_id);
                    }
                }
            }
        }
        if !expired.is_empty() {
            let mut sessions = self.sessions.write().await;
            for chat_id in &expired {
                sessions.remove(chat_id);
            }
        }
        expired
    }
}
