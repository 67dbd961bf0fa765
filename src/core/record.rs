//! Flushed record assembly
//!
//! A record is a flat ordered mapping posted to the sink under a routing
//! key. Merge precedence, lowest to highest, is fixed and deterministic:
//!
//! 1. global data for the unit of work
//! 2. extracted context fields
//! 3. auxiliary extras (the pending state's key/value map, or the payload
//!    of a direct structured post)
//! 4. metadata: rendered messages, severity label, timestamp
//!
//! Everything is flattened at the top level; later steps overwrite earlier
//! ones on key collision.

use crate::core::config::MessagesType;
use crate::core::severity::Severity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Record key for the rendered message payload
pub const MESSAGES_KEY: &str = "messages";
/// Record key for the flush timestamp
pub const TIME_KEY: &str = "time";

/// One assembled record, ready to post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogRecord {
    fields: Map<String, Value>,
}

impl LogRecord {
    /// Merge all record parts in the documented precedence order.
    ///
    /// `messages` is `None` on the direct-post path, which carries its
    /// payload through `extras` and has no message buffer to render.
    pub fn assemble(
        global: Map<String, Value>,
        extracted: Map<String, Value>,
        extras: Map<String, Value>,
        messages: Option<Value>,
        severity: Severity,
        severity_key: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut fields = global;
        fields.extend(extracted);
        fields.extend(extras);
        if let Some(messages) = messages {
            fields.insert(MESSAGES_KEY.to_string(), messages);
        }
        fields.insert(
            severity_key.to_string(),
            Value::String(severity.label().to_string()),
        );
        fields.insert(
            TIME_KEY.to_string(),
            Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Self { fields }
    }

    /// Render the buffered messages per the configured join mode.
    pub fn render_messages(messages: &[String], mode: MessagesType) -> Value {
        match mode {
            MessagesType::List => {
                Value::Array(messages.iter().cloned().map(Value::String).collect())
            }
            MessagesType::Str => Value::String(messages.join("\n")),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_assemble_basic() {
        let record = LogRecord::assemble(
            obj(json!({"request_uuid": "abc"})),
            obj(json!({"user_id": 7})),
            Map::new(),
            Some(json!(["start", "done"])),
            Severity::Info,
            "level",
            ts(),
        );

        assert_eq!(record.get("request_uuid"), Some(&json!("abc")));
        assert_eq!(record.get("user_id"), Some(&json!(7)));
        assert_eq!(record.get("messages"), Some(&json!(["start", "done"])));
        assert_eq!(record.get("level"), Some(&json!("INFO")));
        assert_eq!(record.get("time"), Some(&json!("2024-06-01T12:00:00.000Z")));
    }

    #[test]
    fn test_precedence_extracted_over_global() {
        let record = LogRecord::assemble(
            obj(json!({"user_id": "from-global"})),
            obj(json!({"user_id": "from-extraction"})),
            Map::new(),
            None,
            Severity::Debug,
            "level",
            ts(),
        );
        assert_eq!(record.get("user_id"), Some(&json!("from-extraction")));
    }

    #[test]
    fn test_precedence_extras_over_extracted() {
        let record = LogRecord::assemble(
            Map::new(),
            obj(json!({"k": "extracted"})),
            obj(json!({"k": "extras"})),
            None,
            Severity::Debug,
            "level",
            ts(),
        );
        assert_eq!(record.get("k"), Some(&json!("extras")));
    }

    #[test]
    fn test_precedence_metadata_wins() {
        let record = LogRecord::assemble(
            obj(json!({"level": "spoofed", "time": "spoofed"})),
            Map::new(),
            obj(json!({"messages": "spoofed"})),
            Some(json!(["real"])),
            Severity::Error,
            "level",
            ts(),
        );
        assert_eq!(record.get("level"), Some(&json!("ERROR")));
        assert_eq!(record.get("messages"), Some(&json!(["real"])));
        assert_eq!(record.get("time"), Some(&json!("2024-06-01T12:00:00.000Z")));
    }

    #[test]
    fn test_custom_severity_key() {
        let record = LogRecord::assemble(
            Map::new(),
            Map::new(),
            Map::new(),
            None,
            Severity::Warn,
            "severity",
            ts(),
        );
        assert_eq!(record.get("severity"), Some(&json!("WARN")));
        assert!(record.get("level").is_none());
    }

    #[test]
    fn test_render_messages_list_mode() {
        let rendered = LogRecord::render_messages(
            &["a".to_string(), "b".to_string()],
            MessagesType::List,
        );
        assert_eq!(rendered, json!(["a", "b"]));
    }

    #[test]
    fn test_render_messages_string_mode() {
        let rendered = LogRecord::render_messages(
            &["a".to_string(), "b".to_string()],
            MessagesType::Str,
        );
        assert_eq!(rendered, json!("a\nb"));
    }

    #[test]
    fn test_to_json() {
        let record = LogRecord::assemble(
            Map::new(),
            Map::new(),
            Map::new(),
            Some(json!(["m"])),
            Severity::Info,
            "level",
            ts(),
        );
        let json = record.to_json().unwrap();
        assert!(json.contains("\"level\":\"INFO\""));
        assert!(json.contains("\"messages\":[\"m\"]"));
    }
}
