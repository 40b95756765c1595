//! Dependencies shared by every command.

use std::sync::Arc;

use apikit_core::config::{AppConfig, DatabaseDriver};
use apikit_core::notifications::Notifications;
use apikit_core::result::AppResult;
use apikit_core::traits::{AccountStore, LogSink, Notifier, NotificationType, TracingLogSink};

use crate::output::{self, OutputFormat};

/// Configuration, output format, audit log and pending user messages.
pub struct CommandContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Selected output format.
    pub format: OutputFormat,
    /// Audit log for changes made from the command line.
    pub log: Arc<dyn LogSink>,
    /// Messages shown to the operator when the command finishes.
    pub notifications: Notifications,
}

impl CommandContext {
    /// Create a context around loaded configuration.
    pub fn new(config: AppConfig, format: OutputFormat) -> Self {
        Self {
            config,
            format,
            log: Arc::new(TracingLogSink::new("cli")),
            notifications: Notifications::new(),
        }
    }

    /// Open the configured account store.
    pub async fn account_store(&self) -> AppResult<Arc<dyn AccountStore>> {
        if self.config.database.driver == DatabaseDriver::Memory {
            self.notifications.add(
                "database.driver is \"memory\": changes last only for this command",
                NotificationType::Warning,
            );
        }
        apikit_api::app::build_account_store(&self.config).await
    }

    /// Print and drain pending notifications.
    pub fn flush(&self) {
        for (kind, messages) in self.notifications.take_all().unwrap_or_default() {
            for message in messages {
                output::print_notification(kind, &message);
            }
        }
    }
}
