//! Core error types for intervalroom-core.
//!
//! The timer engine itself never fails. Errors only come from the edges:
//! configuration I/O and the injected collaborators (renderer, audio,
//! power hints), whose failures are logged and swallowed by the session.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Failure reported by an external collaborator.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The capability is not available on this platform
    #[error("{capability} is not supported here")]
    Unsupported { capability: &'static str },

    /// The platform revoked or denied the capability
    #[error("{capability} was denied: {reason}")]
    Denied {
        capability: &'static str,
        reason: String,
    },

    /// Output could not be written
    #[error("Output failed: {0}")]
    Io(#[from] std::io::Error),
}
