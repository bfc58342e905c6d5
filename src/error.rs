//! Error types for CEF encoding and emission

use std::io;
use thiserror::Error;

/// Main error type for cefevent operations
#[derive(Error, Debug)]
pub enum CefError {
    /// CEF version outside of the supported set (0 or 1)
    #[error("invalid cef version: {0}")]
    InvalidCefVersion(u32),

    /// Severity is neither a known keyword nor an integer in 0..=10
    #[error("invalid severity: {0}")]
    InvalidSeverity(String),

    /// Hostname lookup failed while building the syslog envelope
    #[error("failed to get hostname: {0}")]
    HostnameUnavailable(#[source] io::Error),

    /// The output sink rejected the encoded line
    #[error("failed to write log: {0}")]
    SinkWriteFailed(#[source] io::Error),

    /// Hardware address text could not be parsed
    #[error("invalid mac address: {0}")]
    InvalidMacAddress(String),

    /// Configuration is invalid or incomplete
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    /// IO operation failed outside of emission
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A default-logger call happened before a logger was installed
    #[error("default logger is not installed")]
    DefaultLoggerUnset,
}

/// Result type alias for cefevent operations
pub type Result<T> = std::result::Result<T, CefError>;

impl CefError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
