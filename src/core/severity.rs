//! Severity model
//!
//! Fixed ordered severity table with a catch-all label for ranks beyond it.
//! The table matches the classic five-level request-logging convention:
//! DEBUG, INFO, WARN, ERROR, FATAL, with anything above mapping to "ANY".

use crate::core::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    /// Catch-all for ranks beyond the known table
    Any = 5,
}

impl Severity {
    /// Map a numeric rank to a severity. Ranks beyond the table collapse
    /// into the catch-all and never fail the caller.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Severity::Debug,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            4 => Severity::Fatal,
            _ => Severity::Any,
        }
    }

    /// Look up a severity by label, for configuration validation.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnknownSeverity`] if the label is not in the table.
    pub fn from_label(label: &str) -> Result<Self> {
        label
            .parse()
            .map_err(|_| LoggerError::unknown_severity(label))
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Any => "ANY",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
            Severity::Fatal => BrightRed,
            Severity::Any => BrightBlack,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            "ANY" => Ok(Severity::Any),
            _ => Err(format!("Invalid severity label: '{}'", s)),
        }
    }
}
