use serde::{Deserialize, Serialize};

/// Session data as returned by the backend's `/auth/user` endpoint.
///
/// Timestamps are kept as the raw strings the backend sent; they are only
/// parsed when rendered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub provider: String,
    pub issued_at: String,
    pub expires_at: String,
}

/// Whether the current page view holds a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn(SessionRecord),
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn(_))
    }

    pub fn session(&self) -> Option<&SessionRecord> {
        match self {
            AuthState::LoggedIn(session) => Some(session),
            AuthState::LoggedOut => None,
        }
    }
}
