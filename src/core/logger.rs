//! Logger: per-unit-of-work buffering and the flush engine
//!
//! One `Logger` carries the mutable state of one logical unit of work
//! (typically one inbound request): the message buffer, running max
//! severity, auxiliary extras, tag stack, and global data. The sink is
//! shared across loggers; the pending state is not. Concurrent units of
//! work must each own their own `Logger`: every mutation goes through
//! `&mut self`, so interleaving two units through one instance does not
//! compile without a lock, which is the point.
//!
//! Flush moves the state machine Idle -> Accumulating -> Flushing -> Idle:
//! a flush with an empty buffer is an idempotent no-op, and a completed
//! flush resets the buffer, extras, running severity, and global data.

use crate::core::config::{LoggerConfig, MessagesType};
use crate::core::error::Result;
use crate::core::extract::{extract, ContextFields, ExtractionRule, SharedContext};
use crate::core::global_data::GlobalData;
use crate::core::payload::LogPayload;
use crate::core::record::LogRecord;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use crate::core::tag_stack::TagStack;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Mutable per-unit-of-work accumulation state
#[derive(Debug, Default)]
struct PendingState {
    /// Running max severity of buffered calls, rank 0 when nothing ran
    severity: Severity,
    /// Buffered messages, in call order
    messages: Vec<String>,
    /// Auxiliary key/value extras merged into the next flushed record
    extras: Map<String, Value>,
}

pub struct Logger {
    config: LoggerConfig,
    sink: Arc<dyn Sink>,
    tags: TagStack,
    global: GlobalData,
    context: Option<SharedContext>,
    pending: PendingState,
}

impl Logger {
    pub fn new(config: LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        let tags = TagStack::new(config.tag.clone());
        Self {
            config,
            sink,
            tags,
            global: GlobalData::new(),
            context: None,
            pending: PendingState::default(),
        }
    }

    pub fn builder(tag: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(tag)
    }

    /// Log one payload at the given severity.
    ///
    /// Calls below the configured minimum are complete no-ops: nothing is
    /// buffered and the running max is untouched. Structured mappings
    /// bypass the buffer and post immediately; everything else is rendered
    /// and buffered until the next flush (or flushed inline when
    /// `flush_immediately` is configured).
    pub fn log(&mut self, severity: Severity, payload: impl Into<LogPayload>) {
        if severity < self.config.level {
            return;
        }
        match payload.into() {
            LogPayload::Structured(map) => self.post(severity, map),
            payload => {
                self.pending.messages.push(payload.render());
                if severity > self.pending.severity {
                    self.pending.severity = severity;
                }
                if self.config.flush_immediately {
                    self.flush();
                }
            }
        }
    }

    #[inline]
    pub fn debug(&mut self, payload: impl Into<LogPayload>) {
        self.log(Severity::Debug, payload);
    }

    #[inline]
    pub fn info(&mut self, payload: impl Into<LogPayload>) {
        self.log(Severity::Info, payload);
    }

    #[inline]
    pub fn warn(&mut self, payload: impl Into<LogPayload>) {
        self.log(Severity::Warn, payload);
    }

    #[inline]
    pub fn error(&mut self, payload: impl Into<LogPayload>) {
        self.log(Severity::Error, payload);
    }

    #[inline]
    pub fn fatal(&mut self, payload: impl Into<LogPayload>) {
        self.log(Severity::Fatal, payload);
    }

    /// Post a structured mapping immediately, bypassing the message buffer.
    ///
    /// The record merges (lowest to highest) current global data, the
    /// supplied mapping, and severity/timestamp metadata, and goes out
    /// under the current routing key. The message buffer is not touched or
    /// cleared; the running severity is reset afterwards. An empty mapping
    /// or a sub-minimum severity is a no-op.
    pub fn post(&mut self, severity: Severity, data: Map<String, Value>) {
        if severity < self.config.level || data.is_empty() {
            return;
        }
        if severity > self.pending.severity {
            self.pending.severity = severity;
        }
        let record = LogRecord::assemble(
            self.global.snapshot(),
            Map::new(),
            data,
            None,
            self.pending.severity,
            &self.config.severity_key,
            Utc::now(),
        );
        let key = self.tags.current_key();
        self.emit(&key, &record);
        self.pending.severity = Severity::Debug;
    }

    /// Flush the buffered unit of work as one record.
    ///
    /// No-op when the buffer is empty, so calling it on every exit path is
    /// always safe. Otherwise: render messages per the configured join
    /// mode, stamp the severity label of the running max, capture the
    /// routing key and the flush-time timestamp, run context extraction,
    /// assemble, post, and reset all per-unit-of-work state (buffer,
    /// extras, running severity, global data).
    pub fn flush(&mut self) {
        if self.pending.messages.is_empty() {
            return;
        }
        let messages =
            LogRecord::render_messages(&self.pending.messages, self.config.messages_type);
        let context: Option<&dyn ContextFields> = match &self.context {
            Some(ctx) => Some(ctx.as_ref()),
            None => None,
        };
        let extracted = extract(&self.config.extraction_rules, context);
        let record = LogRecord::assemble(
            self.global.take(),
            extracted,
            std::mem::take(&mut self.pending.extras),
            Some(messages),
            self.pending.severity,
            &self.config.severity_key,
            Utc::now(),
        );
        let key = self.tags.current_key();
        self.emit(&key, &record);
        self.pending.severity = Severity::Debug;
        self.pending.messages.clear();
    }

    /// Post to the sink, swallowing failures. Logging must never error
    /// back into application code.
    fn emit(&self, tag: &str, record: &LogRecord) {
        if let Err(e) = self.sink.post(tag, record) {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' failed to post under '{}': {}",
                self.sink.name(),
                tag,
                e
            );
        }
    }

    /// Replace the global data store for the current unit of work.
    pub fn set_global_data(&mut self, data: Map<String, Value>) {
        self.global.set(data);
    }

    /// Merge keys into the global data store; non-object values are
    /// silently ignored.
    pub fn merge_global_data(&mut self, value: Value) {
        self.global.merge(value);
    }

    /// Set an auxiliary field carried by the next flushed record.
    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.pending.extras.insert(key.into(), value);
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.pending.extras.get(key)
    }

    /// Push scope tags; blank entries are filtered. Returns the tags
    /// actually appended.
    pub fn push_tags<I, S>(&mut self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(tags)
    }

    /// Pop up to `count` scope tags, clamped to the current depth.
    pub fn pop_tags(&mut self, count: usize) -> Vec<String> {
        self.tags.pop(count)
    }

    /// Administrative tag reset, outside the normal scope discipline.
    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    /// Routing key records would currently be posted under.
    pub fn current_key(&self) -> String {
        self.tags.current_key()
    }

    pub fn tag_depth(&self) -> usize {
        self.tags.depth()
    }

    /// Number of messages waiting in the buffer.
    pub fn buffered_count(&self) -> usize {
        self.pending.messages.len()
    }

    /// Running max severity of the buffered unit of work.
    pub fn running_severity(&self) -> Severity {
        self.pending.severity
    }

    /// Minimum severity the logger was constructed with.
    pub fn min_level(&self) -> Severity {
        self.config.level
    }

    pub(crate) fn replace_context(&mut self, ctx: SharedContext) -> Option<SharedContext> {
        self.context.replace(ctx)
    }

    pub(crate) fn restore_context(&mut self, prev: Option<SharedContext>) {
        self.context = prev;
    }

    /// Release sink resources.
    pub fn close(&self) {
        self.sink.close();
    }
}

/// Fluent constructor for [`Logger`]
///
/// # Example
///
/// ```
/// use scope_logger::prelude::*;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let mut logger = Logger::builder("app")
///     .level(Severity::Info)
///     .messages_type(MessagesType::List)
///     .extraction_rule("env", ExtractionRule::Constant(json!("prod")))
///     .sink(Arc::clone(&sink) as Arc<dyn Sink>)
///     .build();
///
/// logger.info("ready");
/// logger.flush();
/// assert_eq!(sink.posted().len(), 1);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            config: LoggerConfig::new(tag),
            sink: None,
        }
    }

    /// Start from an already-validated configuration.
    pub fn from_config(config: LoggerConfig) -> Self {
        Self { config, sink: None }
    }

    /// Minimum severity; lower calls are no-ops.
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn messages_type(mut self, messages_type: MessagesType) -> Self {
        self.config.messages_type = messages_type;
        self
    }

    /// Record key the severity label is written under.
    #[must_use = "builder methods return a new value"]
    pub fn severity_key(mut self, key: impl Into<String>) -> Self {
        self.config.severity_key = key.into();
        self
    }

    /// Flush synchronously after every buffered message. Useful when no
    /// explicit unit-of-work boundary exists.
    #[must_use = "builder methods return a new value"]
    pub fn flush_immediately(mut self, enable: bool) -> Self {
        self.config.flush_immediately = enable;
        self
    }

    /// Add a context extraction rule under the given record key.
    #[must_use = "builder methods return a new value"]
    pub fn extraction_rule(mut self, name: impl Into<String>, rule: ExtractionRule) -> Self {
        self.config.extraction_rules.insert(name.into(), rule);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the logger. Without a sink, records are dropped.
    pub fn build(self) -> Logger {
        let sink = self.sink.unwrap_or_else(|| Arc::new(NullSink));
        Logger::new(self.config, sink)
    }
}

/// Sink that drops everything; the builder default
struct NullSink;

impl Sink for NullSink {
    fn post(&self, _tag: &str, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn close(&self) {}

    fn name(&self) -> &str {
        "null"
    }
}
