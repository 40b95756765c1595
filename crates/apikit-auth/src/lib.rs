//! # apikit-auth
//!
//! Credential handling for the apikit API.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `secret`: random strings, salted HMAC hashes, access-token generation
//! - `token`: bearer access-token resolution from query or HTTP Basic credentials

pub mod password;
pub mod secret;
pub mod token;

pub use password::PasswordHasher;
pub use token::{AccessTokenResolver, BasicCredentials, TokenResolution, TokenSource, TokenState};
