//! Console sink
//!
//! Writes records to stderr with a colored severity label. A local stand-in
//! for the collector during development; same contract, no network.

use crate::core::{LogRecord, Result, Severity, Sink};
use colored::Colorize;

/// Sink that prints records to stderr
pub struct ConsoleSink {
    use_colors: bool,
    severity_key: String,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            severity_key: "level".to_string(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, enable: bool) -> Self {
        self.use_colors = enable;
        self
    }

    /// Record key to read the severity label from, for coloring. Must
    /// match the logger's configured severity key.
    #[must_use]
    pub fn severity_key(mut self, key: impl Into<String>) -> Self {
        self.severity_key = key.into();
        self
    }

    fn format(&self, tag: &str, record: &LogRecord) -> String {
        let label = record
            .get(&self.severity_key)
            .and_then(|v| v.as_str())
            .unwrap_or("ANY");

        let shown = if self.use_colors {
            let color = label
                .parse::<Severity>()
                .unwrap_or(Severity::Any)
                .color_code();
            format!("{:5}", label).color(color).to_string()
        } else {
            format!("{:5}", label)
        };

        let body = record.to_json().unwrap_or_else(|_| "{}".to_string());
        format!("{} [{}] {}", tag, shown, body)
    }
}

impl Sink for ConsoleSink {
    fn post(&self, tag: &str, record: &LogRecord) -> Result<()> {
        eprintln!("{}", self.format(tag, record));
        Ok(())
    }

    fn close(&self) {}

    fn name(&self) -> &str {
        "console"
    }
}
