//! Core logger types and traits

pub mod config;
pub mod error;
pub mod extract;
pub mod global_data;
pub mod logger;
pub mod payload;
pub mod record;
pub mod scope;
pub mod severity;
pub mod sink;
pub mod tag_stack;

pub use config::{LoggerConfig, LoggerSettings, MessagesType};
pub use error::{LoggerError, Result};
pub use extract::{
    extract, ContextFields, ExtractionRule, ExtractionRules, SharedContext,
    EXTRACTION_ERROR_MARKER,
};
pub use global_data::GlobalData;
pub use logger::{Logger, LoggerBuilder};
pub use payload::LogPayload;
pub use record::{LogRecord, MESSAGES_KEY, TIME_KEY};
pub use scope::Scope;
pub use severity::Severity;
pub use sink::Sink;
pub use tag_stack::TagStack;
