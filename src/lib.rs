//! Common Event Format (CEF) encoder and logger
//!
//! This library turns security events into CEF lines, the pipe-delimited
//! text format consumed by ArcSight, Splunk, QRadar and most other SIEMs.
//! It handles header and extension escaping, field presence rules, the
//! fixed extension order and the optional syslog envelope. Transport is up
//! to the caller: lines go to any [`std::io::Write`].
//!
//! # Example
//!
//! ```no_run
//! use cefevent::{Extensions, LoggerBuilder};
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! # fn example() -> cefevent::Result<()> {
//! let mut logger = LoggerBuilder::new("cyberdyne", "skynet", "0.9.0")
//!     .omit_syslog_header()
//!     .build(std::io::stdout());
//!
//! let ext = Extensions {
//!     source_address: Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))),
//!     source_user_name: "alice".to_string(),
//!     ..Default::default()
//! };
//!
//! // CEF:1|cyberdyne|skynet|0.9.0|4625|failed login|High|src=10.0.0.7 suser=alice
//! logger.log_high("4625", "failed login", &ext)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use config::{CefVersion, LoggerConfig};
pub use error::{CefError, Result};
pub use extensions::{DeviceDirection, EventType, Extensions, MacAddress};
pub use logger::{BoxedSink, Event, Logger, LoggerBuilder};
pub use severity::{validate_severity, Severity};
pub use source::{Clock, HostnameSource, StaticHostname, SystemClock, SystemHostname};

/// Error types
pub mod error;

/// Header and extension escaping
pub mod escape;

/// Severity keywords and validation
pub mod severity;

/// Extension fields and their encoding
pub mod extensions;

/// Time and hostname providers
pub mod source;

/// Logger configuration
pub mod config;

/// CEF event logger
pub mod logger;

/// Process-wide default logger handle
pub mod default_logger;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings.
///
/// Diagnostics go to stderr as JSON, filtered by `RUST_LOG`, so stdout
/// stays free for CEF output.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
