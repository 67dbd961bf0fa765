//! Logger configuration
//!
//! [`LoggerSettings`] is the externally-loaded surface (mirrors the YAML a
//! deployment would ship: tag, collector host/port, level label, message
//! join mode). It validates into a [`LoggerConfig`], the runtime form the
//! engine consumes, which additionally carries extraction rules. Rules hold
//! code (computed closures), so they never travel through serde.

use crate::core::error::{LoggerError, Result};
use crate::core::extract::ExtractionRules;
use crate::core::severity::Severity;
use serde::{Deserialize, Serialize};

/// How buffered messages are rendered into the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessagesType {
    /// Ordered JSON array of message strings
    #[default]
    #[serde(rename = "list")]
    List,
    /// Single newline-joined string
    #[serde(rename = "string")]
    Str,
}

fn default_severity_key() -> String {
    "level".to_string()
}

/// Externally-loaded logger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Base routing tag
    pub tag: String,
    /// Collector host
    pub host: String,
    /// Collector port
    pub port: u16,
    /// Minimum severity label (validated against the severity table)
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub messages_type: MessagesType,
    /// Record key the severity label is written under
    #[serde(default = "default_severity_key")]
    pub severity_key: String,
    /// Flush synchronously after every buffered message
    #[serde(default)]
    pub flush_immediately: bool,
}

impl LoggerSettings {
    /// Validate and produce the runtime configuration.
    ///
    /// # Errors
    ///
    /// Fails with [`LoggerError::InvalidConfiguration`] on an empty tag or
    /// severity key, and [`LoggerError::UnknownSeverity`] on a level label
    /// outside the severity table.
    pub fn into_config(self) -> Result<LoggerConfig> {
        if self.tag.trim().is_empty() {
            return Err(LoggerError::config("LoggerSettings", "empty base tag"));
        }
        if self.severity_key.trim().is_empty() {
            return Err(LoggerError::config("LoggerSettings", "empty severity key"));
        }
        let level = match self.level {
            Some(label) => Severity::from_label(&label)?,
            None => Severity::Debug,
        };
        Ok(LoggerConfig {
            tag: self.tag,
            level,
            messages_type: self.messages_type,
            severity_key: self.severity_key,
            flush_immediately: self.flush_immediately,
            extraction_rules: ExtractionRules::new(),
        })
    }

    /// Collector address in `host:port` form, for the forward sink.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Runtime configuration consumed by the logger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Base routing tag
    pub tag: String,
    /// Minimum severity; lower calls are complete no-ops. Fixed at
    /// construction.
    pub level: Severity,
    pub messages_type: MessagesType,
    /// Record key the severity label is written under
    pub severity_key: String,
    /// Flush synchronously after every buffered message
    pub flush_immediately: bool,
    /// Context extraction rules, evaluated on every flush
    pub extraction_rules: ExtractionRules,
}

impl LoggerConfig {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            level: Severity::Debug,
            messages_type: MessagesType::List,
            severity_key: default_severity_key(),
            flush_immediately: false,
            extraction_rules: ExtractionRules::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::ExtractionRule;
    use serde_json::json;

    #[test]
    fn test_settings_from_json() {
        let settings: LoggerSettings = serde_json::from_value(json!({
            "tag": "app",
            "host": "127.0.0.1",
            "port": 24224,
            "level": "INFO",
            "messages_type": "string"
        }))
        .unwrap();

        assert_eq!(settings.address(), "127.0.0.1:24224");
        let config = settings.into_config().unwrap();
        assert_eq!(config.tag, "app");
        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.messages_type, MessagesType::Str);
        assert_eq!(config.severity_key, "level");
        assert!(!config.flush_immediately);
    }

    #[test]
    fn test_settings_defaults() {
        let settings: LoggerSettings = serde_json::from_value(json!({
            "tag": "app",
            "host": "localhost",
            "port": 24224
        }))
        .unwrap();

        let config = settings.into_config().unwrap();
        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.messages_type, MessagesType::List);
    }

    #[test]
    fn test_unknown_level_label_rejected() {
        let settings: LoggerSettings = serde_json::from_value(json!({
            "tag": "app",
            "host": "localhost",
            "port": 24224,
            "level": "LOUD"
        }))
        .unwrap();

        let err = settings.into_config().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownSeverity(_)));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let settings: LoggerSettings = serde_json::from_value(json!({
            "tag": "  ",
            "host": "localhost",
            "port": 24224
        }))
        .unwrap();

        let err = settings.into_config().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_config_carries_rules() {
        let mut config = LoggerConfig::new("app");
        config
            .extraction_rules
            .insert("env".to_string(), ExtractionRule::Constant(json!("prod")));
        assert_eq!(config.extraction_rules.len(), 1);
    }
}
