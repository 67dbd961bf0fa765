//! # Scope Logger
//!
//! Request-scoped buffered structured logging: log calls inside one unit
//! of work accumulate in memory, get tagged with scoped and global
//! context, and flush as a single structured record to a remote collector
//! when the scope exits.
//!
//! ## Features
//!
//! - **Unit-of-work buffering**: One record per request, not per log call
//! - **Hierarchical tags**: Nested scopes compose a dot-joined routing key
//! - **Context extraction**: Constant, accessor, and computed rules pull
//!   fields from the request object at flush time
//! - **Guaranteed flush**: Scopes flush on every exit path, panics included
//! - **Best-effort delivery**: Sink failures never reach application code

pub mod core;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::core::{
        ContextFields, ExtractionRule, ExtractionRules, GlobalData, LogPayload, LogRecord,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerSettings, MessagesType, Result,
        Scope, Severity, SharedContext, Sink, TagStack, EXTRACTION_ERROR_MARKER,
    };
    pub use crate::sinks::{ForwardSink, MemorySink};
}

#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
pub use self::core::{
    ContextFields, ExtractionRule, ExtractionRules, GlobalData, LogPayload, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerSettings, MessagesType, Result, Scope,
    Severity, SharedContext, Sink, TagStack, EXTRACTION_ERROR_MARKER,
};
pub use sinks::{ForwardSink, MemorySink};
