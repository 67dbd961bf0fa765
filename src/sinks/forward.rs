//! Forward sink for remote collectors
//!
//! Ships records to a log collector over TCP, one JSON line per record,
//! framed the way forward-protocol collectors expect:
//! `[tag, unix_seconds, record]`.

use crate::core::{LogRecord, LoggerError, Result, Sink};
use chrono::Utc;
use parking_lot::Mutex;
use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

enum Connection {
    Connected(TcpStream),
    Disconnected,
    Closed,
}

/// Sink that forwards records to a TCP collector
///
/// One instance is shared by every per-unit-of-work logger in the process;
/// the connection lives behind a mutex. Posting is best-effort: on a write
/// failure the connection is dropped and, unless disabled, re-established
/// once for a single resend attempt.
///
/// # Example
///
/// ```no_run
/// use scope_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(ForwardSink::new("127.0.0.1:24224")
///     .expect("Failed to connect to collector"));
///
/// let mut logger = Logger::builder("app")
///     .sink(sink as Arc<dyn Sink>)
///     .build();
/// logger.info("request started");
/// logger.flush();
/// ```
pub struct ForwardSink {
    conn: Mutex<Connection>,
    address: String,
    reconnect_on_error: bool,
}

impl ForwardSink {
    /// Connect to the collector.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::SinkUnavailable`] if the connection fails.
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::connect(&address)?;
        Ok(Self {
            conn: Mutex::new(Connection::Connected(stream)),
            address,
            reconnect_on_error: true,
        })
    }

    /// Defer connecting until the first post. Useful when the collector
    /// may come up after the application.
    pub fn lazy(addr: impl ToString) -> Self {
        Self {
            conn: Mutex::new(Connection::Disconnected),
            address: addr.to_string(),
            reconnect_on_error: true,
        }
    }

    /// Enable or disable the reconnect-and-resend attempt on write errors.
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn connect(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)
            .map_err(|e| LoggerError::sink_unavailable(format!("{}: {}", address, e)))?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        // Low-latency writes; records are small and flushed per unit of work
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn frame(tag: &str, record: &LogRecord) -> Result<Vec<u8>> {
        let mut line =
            serde_json::to_vec(&(tag, Utc::now().timestamp(), record.fields()))?;
        line.push(b'\n');
        Ok(line)
    }
}

impl Sink for ForwardSink {
    fn post(&self, tag: &str, record: &LogRecord) -> Result<()> {
        let line = Self::frame(tag, record)?;
        let mut conn = self.conn.lock();

        match &mut *conn {
            Connection::Closed => {
                return Err(LoggerError::sink_unavailable("sink closed"));
            }
            Connection::Disconnected => {
                *conn = Connection::Connected(Self::connect(&self.address)?);
            }
            Connection::Connected(_) => {}
        }

        let result = match &mut *conn {
            Connection::Connected(stream) => stream.write_all(&line),
            _ => unreachable!("connection established above"),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Connection lost
                *conn = Connection::Disconnected;

                if self.reconnect_on_error {
                    let mut stream = Self::connect(&self.address).map_err(|reconnect_err| {
                        LoggerError::sink_unavailable(format!(
                            "failed to post and reconnect: {} (reconnect: {})",
                            e, reconnect_err
                        ))
                    })?;
                    stream
                        .write_all(&line)
                        .map_err(|e| LoggerError::sink_io("resending record", "write failed", e))?;
                    *conn = Connection::Connected(stream);
                    Ok(())
                } else {
                    Err(LoggerError::sink_io("posting record", "write failed", e))
                }
            }
        }
    }

    fn close(&self) {
        let mut conn = self.conn.lock();
        if let Connection::Connected(stream) = &*conn {
            let _ = stream.shutdown(Shutdown::Both);
        }
        *conn = Connection::Closed;
    }

    fn name(&self) -> &str {
        "forward"
    }
}
