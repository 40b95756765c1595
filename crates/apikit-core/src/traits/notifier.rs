//! User-facing notification sink.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Notification category, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Informational.
    Info,
    /// Diagnostic output.
    Debug,
}

impl NotificationType {
    /// All types in display order.
    pub const ALL: [NotificationType; 5] = [
        Self::Success,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Parse a type name, falling back to [`NotificationType::Info`].
    pub fn parse_or_info(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or(Self::Info)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Something that collects notifications for later display.
pub trait Notifier: Send + Sync {
    /// Add one message of the given type.
    fn add(&self, message: &str, kind: NotificationType);

    /// Add several messages grouped by type.
    fn add_multiple(&self, messages: BTreeMap<NotificationType, Vec<String>>) {
        for (kind, list) in messages {
            for message in list {
                self.add(&message, kind);
            }
        }
    }
}
