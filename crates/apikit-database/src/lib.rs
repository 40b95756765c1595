//! # apikit-database
//!
//! PostgreSQL connection management, HTTP-style DSN parsing, and the
//! account stores backing access-token resolution.

pub mod connection;
pub mod dsn;
pub mod repositories;

pub use connection::{DatabasePool, open_account_store};
pub use dsn::DsnParts;
pub use repositories::{AccountRepository, MemoryAccountStore};
