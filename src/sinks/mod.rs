//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
pub mod forward;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use forward::ForwardSink;
pub use memory::MemorySink;

// Re-export the trait for convenience
pub use crate::core::Sink;
