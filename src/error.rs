//! Unified error types for the airlock controller.
//!
//! Only construction (configuration) and trigger parsing can fail.  The
//! per-tick control path is total: empty hardware groups and undefined
//! readings degrade to defined defaults instead of producing errors.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration value failed validation.
    Config(&'static str),
    /// Configuration text could not be decoded.
    ConfigParse(String),
    /// Two configured zones share a name (case-insensitive).
    DuplicateZone(String),
    /// A trigger named a zone that is not configured.
    UnknownZone(String),
    /// A trigger argument did not end in a recognised verb.
    UnknownTrigger(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::ConfigParse(msg) => write!(f, "config parse: {msg}"),
            Self::DuplicateZone(name) => write!(f, "duplicate zone: '{name}'"),
            Self::UnknownZone(name) => write!(f, "unknown zone: '{name}'"),
            Self::UnknownTrigger(arg) => write!(f, "unknown trigger: '{arg}'"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigParse(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
