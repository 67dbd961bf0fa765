//! Log payload variants and rendering
//!
//! Everything a log call can carry is one of a closed set of shapes. The
//! buffered path renders to a display string; structured maps are routed to
//! the direct-post path by the logger instead of being buffered.

use serde_json::{Map, Value};

/// Payload of a single log call
#[derive(Debug, Clone)]
pub enum LogPayload {
    /// Plain text message
    Text(String),
    /// Raw bytes, normalized to UTF-8 (lossy) before buffering
    Bytes(Vec<u8>),
    /// Error-like payload with an optional backtrace
    Error {
        message: String,
        kind: String,
        backtrace: Option<String>,
    },
    /// Structured mapping, posted directly instead of buffered
    Structured(Map<String, Value>),
    /// Arbitrary structured value, rendered to its JSON text
    Value(Value),
}

impl LogPayload {
    /// Build an error payload from any std error. The kind is the error's
    /// source-chain head description when present, otherwise "error".
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        LogPayload::Error {
            message: err.to_string(),
            kind: err
                .source()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "error".to_string()),
            backtrace: None,
        }
    }

    /// True for payloads that bypass the message buffer
    pub fn is_structured(&self) -> bool {
        matches!(self, LogPayload::Structured(_))
    }

    /// Render the payload to the string form that goes into the message
    /// buffer. Bytes are normalized here so a mixed-encoding input cannot
    /// corrupt the eventual join.
    pub fn render(&self) -> String {
        match self {
            LogPayload::Text(s) => s.clone(),
            LogPayload::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            LogPayload::Error {
                message,
                kind,
                backtrace,
            } => match backtrace {
                Some(bt) => format!("{} ({})\n{}", message, kind, bt),
                None => format!("{} ({})", message, kind),
            },
            LogPayload::Structured(map) => {
                serde_json::to_string(map).unwrap_or_else(|_| String::new())
            }
            LogPayload::Value(v) => match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

impl From<&str> for LogPayload {
    fn from(s: &str) -> Self {
        LogPayload::Text(s.to_string())
    }
}

impl From<String> for LogPayload {
    fn from(s: String) -> Self {
        LogPayload::Text(s)
    }
}

impl From<Map<String, Value>> for LogPayload {
    fn from(map: Map<String, Value>) -> Self {
        LogPayload::Structured(map)
    }
}

impl From<Value> for LogPayload {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(map) => LogPayload::Structured(map),
            other => LogPayload::Value(other),
        }
    }
}

impl From<Vec<u8>> for LogPayload {
    fn from(b: Vec<u8>) -> Self {
        LogPayload::Bytes(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_render() {
        let payload = LogPayload::from("hello");
        assert_eq!(payload.render(), "hello");
    }

    #[test]
    fn test_bytes_normalized_lossy() {
        // 0xFF is not valid UTF-8; rendering must not fail or carry raw bytes
        let payload = LogPayload::Bytes(vec![b'o', b'k', 0xFF]);
        let rendered = payload.render();
        assert!(rendered.starts_with("ok"));
        assert!(rendered.contains('\u{FFFD}'));
    }

    #[test]
    fn test_error_render_with_backtrace() {
        let payload = LogPayload::Error {
            message: "boom".to_string(),
            kind: "RuntimeError".to_string(),
            backtrace: Some("at handler.rs:10".to_string()),
        };
        assert_eq!(payload.render(), "boom (RuntimeError)\nat handler.rs:10");
    }

    #[test]
    fn test_error_render_without_backtrace() {
        let payload = LogPayload::Error {
            message: "boom".to_string(),
            kind: "RuntimeError".to_string(),
            backtrace: None,
        };
        assert_eq!(payload.render(), "boom (RuntimeError)");
    }

    #[test]
    fn test_from_std_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let payload = LogPayload::from_error(&io_err);
        assert!(payload.render().contains("missing"));
    }

    #[test]
    fn test_object_value_becomes_structured() {
        let payload = LogPayload::from(json!({"a": 1}));
        assert!(payload.is_structured());
    }

    #[test]
    fn test_scalar_value_renders_to_text() {
        let payload = LogPayload::from(json!(42));
        assert!(!payload.is_structured());
        assert_eq!(payload.render(), "42");
    }

    #[test]
    fn test_string_value_renders_unquoted() {
        let payload = LogPayload::Value(json!("plain"));
        assert_eq!(payload.render(), "plain");
    }
}
