//! Error types and result aliases for sprig operations.
//!
//! Every failure that can abort a tree reconstruction is a variant of
//! [`SprigError`]. Callers branch on the variant (or on [`SprigError::code`])
//! rather than on message text.

use thiserror::Error;

/// Unified error type for all sprig operations
#[derive(Error, Debug)]
pub enum SprigError {
    // Source desynchronization
    #[error("{lockfile} and package.json out of sync: no entry for {name}@{range}")]
    LockOutOfSync {
        lockfile: String,
        name: String,
        range: String,
    },

    #[error("Dependency '{name}' is not installed")]
    NotInstalled { name: String },

    // Malformed input
    #[error("Malformed dependency data: {message}")]
    MalformedInput { message: String },

    #[error("Failed to parse JSON: {message}")]
    JsonParse { message: String },

    #[error("Failed to parse lockfile at line {line}: {message}")]
    LockfileParse { line: usize, message: String },

    // Output errors
    #[error("Failed to serialize {what}: {message}")]
    Serialization { what: String, message: String },

    // Config errors
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for sprig operations
pub type SprigResult<T> = Result<T, SprigError>;

impl SprigError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a malformed-input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SprigError::LockOutOfSync { .. } => "LOCK_OUT_OF_SYNC",
            SprigError::NotInstalled { .. } => "MODULE_NOT_INSTALLED",
            SprigError::MalformedInput { .. } => "MALFORMED_INPUT",
            SprigError::JsonParse { .. } => "JSON_PARSE",
            SprigError::LockfileParse { .. } => "LOCKFILE_PARSE",
            SprigError::Serialization { .. } => "SERIALIZATION",
            SprigError::ConfigValidation { .. } => "CONFIG_INVALID",
            SprigError::Io { .. } => "IO",
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            SprigError::LockOutOfSync { .. } => {
                Some("Reinstall dependencies so the lockfile matches package.json")
            },
            SprigError::NotInstalled { .. } => {
                Some("Run your package manager's install command before inspecting node_modules")
            },
            SprigError::LockfileParse { .. } | SprigError::JsonParse { .. } => {
                Some("Check that the file was written by a supported package manager")
            },
            SprigError::ConfigValidation { .. } => {
                Some("Check sprig.toml and SPRIG_* environment variables")
            },
            _ => None,
        }
    }
}
