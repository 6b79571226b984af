//! Multi-turn credential onboarding.

mod manager;
mod state;

pub use manager::SessionManager;
pub use state::{OnboardingSession, SessionState};
