//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Severity label not present in the severity table
    #[error("Unknown severity label: '{0}'")]
    UnknownSeverity(String),

    /// Sink has no usable connection
    #[error("Sink unavailable: {0}")]
    SinkUnavailable(String),

    /// IO failure inside a sink, with context
    #[error("Sink IO error while {operation}: {message}")]
    SinkIo {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unknown-severity error
    pub fn unknown_severity(label: impl Into<String>) -> Self {
        LoggerError::UnknownSeverity(label.into())
    }

    /// Create a sink-unavailable error
    pub fn sink_unavailable(msg: impl Into<String>) -> Self {
        LoggerError::SinkUnavailable(msg.into())
    }

    /// Create a sink IO error with context
    pub fn sink_io(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::SinkIo {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
