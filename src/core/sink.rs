//! Sink trait

use crate::core::error::Result;
use crate::core::record::LogRecord;

/// Destination for flushed records.
///
/// `post` is best-effort: the logger reports a failed post to stderr and
/// carries on, so a sink error can never propagate into application code.
/// Sinks take `&self` because one sink instance is shared across the
/// per-unit-of-work loggers; implementations hold any connection state
/// behind their own interior mutability.
pub trait Sink: Send + Sync {
    fn post(&self, tag: &str, record: &LogRecord) -> Result<()>;

    /// Release sink resources. Posting after close is a sink-defined error.
    fn close(&self);

    fn name(&self) -> &str;
}
