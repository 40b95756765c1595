//! Line-oriented log sink.

/// A destination accepting one log line at a time.
pub trait LogSink: Send + Sync {
    /// Write a single line.
    fn write(&self, line: &str);

    /// Write each line in order. Returns `false` when there was nothing to write.
    fn write_all(&self, lines: &[String]) -> bool {
        if lines.is_empty() {
            return false;
        }
        for line in lines {
            self.write(line);
        }
        true
    }
}

/// [`LogSink`] that forwards lines to `tracing` at `INFO` level.
#[derive(Debug, Clone, Default)]
pub struct TracingLogSink {
    channel: &'static str,
}

impl TracingLogSink {
    /// Create a sink tagging each line with `channel`.
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

impl LogSink for TracingLogSink {
    fn write(&self, line: &str) {
        tracing::info!(channel = self.channel, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Captured(Mutex<Vec<String>>);

    impl LogSink for Captured {
        fn write(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    #[test]
    fn test_write_all_preserves_order() {
        let sink = Captured::default();
        assert!(sink.write_all(&["one".to_string(), "two".to_string()]));
        assert!(!sink.write_all(&[]));
        assert_eq!(*sink.0.lock().unwrap(), vec!["one", "two"]);
    }
}
