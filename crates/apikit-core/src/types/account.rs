//! API account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An API account able to obtain a bearer access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Primary key.
    pub id: Uuid,
    /// Login email (unique, compared case-insensitively).
    pub email: String,
    /// Argon2 PHC hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Long-lived bearer access token.
    pub access_token: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh id.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            access_token: None,
            created_at: Utc::now(),
        }
    }

    /// Set the access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}
