//! Bearer access-token resolution.

pub mod resolver;

pub use resolver::{AccessTokenResolver, TokenResolution, TokenSource, TokenState};

/// Credentials supplied through HTTP Basic authentication.
///
/// The user part is always an email; the secret is either the account
/// password or its access token.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Account email.
    pub email: String,
    /// Password or access token.
    pub secret: String,
}

impl BasicCredentials {
    /// Create credentials.
    pub fn new(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("email", &self.email)
            .field("secret", &"****")
            .finish()
    }
}
