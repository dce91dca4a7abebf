use serde::{Deserialize, Serialize};

/// An authenticated user account, as returned by the backend.
///
/// Read-only projection of server state; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: super::UserId,
    pub name: String,
    pub email: String,
    /// "Individual" or "Organization"
    pub user_type: String,
}

/// Payload for creating a new account.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
}

/// Response of the login and register endpoints: a bearer token plus the
/// signed-in user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}
