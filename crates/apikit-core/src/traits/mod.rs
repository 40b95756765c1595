//! Capability traits defined in `apikit-core` and implemented by other crates.

pub mod account_store;
pub mod log_sink;
pub mod notifier;

pub use account_store::AccountStore;
pub use log_sink::{LogSink, TracingLogSink};
pub use notifier::{NotificationType, Notifier};
