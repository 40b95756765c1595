//! Hashing secrets.

use serde::{Deserialize, Serialize};

/// Secrets used by the salted-hash and token helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Application-wide salt mixed into every salted hash.
    #[serde(default = "default_salt")]
    pub salt: String,
    /// Optional pepper appended to the salt when deriving access tokens.
    #[serde(default)]
    pub pepper: String,
    /// Length of generated access tokens' random seed.
    #[serde(default = "default_token_seed_length")]
    pub token_seed_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            salt: default_salt(),
            pepper: String::new(),
            token_seed_length: default_token_seed_length(),
        }
    }
}

fn default_salt() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_seed_length() -> usize {
    32
}
