//! [`AccountStore`](apikit_core::traits::AccountStore) implementations.

pub mod account;
pub mod memory;

pub use account::AccountRepository;
pub use memory::MemoryAccountStore;
