//! CEF event logger
//!
//! A [`Logger`] owns the device identity and output sink, and turns each
//! call into one line of the form
//!
//! ```text
//! [<Mon D HH:MM:SS> <hostname> ]CEF:<ver>|<vendor>|<product>|<version>|<class id>|<name>|<severity>|<extensions>
//! ```
//!
//! The line is handed to the sink with a single `write_all`. No newline is
//! appended. Severity text is embedded as given; see
//! [`validate_severity`](crate::validate_severity) for opt-in checking.

use crate::config::CefVersion;
use crate::error::{CefError, Result};
use crate::escape::escape_header_field_cow;
use crate::extensions::Extensions;
use crate::severity::Severity;
use crate::source::{Clock, HostnameSource, SystemClock, SystemHostname};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::io::Write;
use tracing::{debug, trace};

/// strftime pattern for the syslog envelope, e.g. `Nov 9 11:45:20`
pub const SYSLOG_TIMESTAMP_FORMAT: &str = "%b %-d %H:%M:%S";

/// Type-erased sink, used by the process-wide default logger
pub type BoxedSink = Box<dyn Write + Send>;

/// A single event to emit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Signature identifying the kind of event
    pub device_event_class_id: String,
    /// Human readable description
    pub name: String,
    /// Keyword or integer 0-10
    pub severity: String,
    /// Extension fields
    #[serde(default)]
    pub extensions: Extensions,
}

impl Event {
    /// Create an event with no extensions
    pub fn new(
        device_event_class_id: impl Into<String>,
        name: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            device_event_class_id: device_event_class_id.into(),
            name: name.into(),
            severity: severity.into(),
            extensions: Extensions::default(),
        }
    }

    /// Attach extension fields
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Builder for configuring a [`Logger`]
pub struct LoggerBuilder {
    cef_version: CefVersion,
    syslog_header: bool,
    device_vendor: String,
    device_product: String,
    device_version: String,
    clock: Box<dyn Clock>,
    hostname: Box<dyn HostnameSource>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("cef_version", &self.cef_version)
            .field("syslog_header", &self.syslog_header)
            .field("device_vendor", &self.device_vendor)
            .field("device_product", &self.device_product)
            .field("device_version", &self.device_version)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    /// Create a builder with CEF version 1, the syslog envelope enabled,
    /// system time and system hostname
    pub fn new(
        device_vendor: impl Into<String>,
        device_product: impl Into<String>,
        device_version: impl Into<String>,
    ) -> Self {
        Self {
            cef_version: CefVersion::default(),
            syslog_header: true,
            device_vendor: device_vendor.into(),
            device_product: device_product.into(),
            device_version: device_version.into(),
            clock: Box::new(SystemClock),
            hostname: Box::new(SystemHostname),
        }
    }

    /// Set the CEF format version
    pub fn cef_version(mut self, version: CefVersion) -> Self {
        self.cef_version = version;
        self
    }

    /// Omit the syslog envelope. Useful when writing to a file or piping
    /// into an existing syslog implementation.
    pub fn omit_syslog_header(self) -> Self {
        self.syslog_header(false)
    }

    /// Enable or disable the syslog envelope
    pub fn syslog_header(mut self, enabled: bool) -> Self {
        self.syslog_header = enabled;
        self
    }

    /// Replace the time source
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the hostname source
    pub fn hostname_source(mut self, source: impl HostnameSource + 'static) -> Self {
        self.hostname = Box::new(source);
        self
    }

    /// Build a logger writing to `out`
    pub fn build<W: Write>(self, out: W) -> Logger<W> {
        debug!(
            cef_version = self.cef_version.as_u8(),
            syslog_header = self.syslog_header,
            device_vendor = %self.device_vendor,
            device_product = %self.device_product,
            device_version = %self.device_version,
            "CEF logger configured"
        );
        Logger {
            syslog_header: self.syslog_header,
            cef_version: self.cef_version,
            out,
            clock: self.clock,
            hostname: self.hostname,
            device_vendor: self.device_vendor,
            device_product: self.device_product,
            device_version: self.device_version,
        }
    }

    /// Build a logger over a type-erased sink
    pub fn build_boxed<W: Write + Send + 'static>(self, out: W) -> Logger<BoxedSink> {
        self.build(Box::new(out) as BoxedSink)
    }
}

/// Logger for CEF events
pub struct Logger<W: Write> {
    syslog_header: bool,
    cef_version: CefVersion,
    out: W,
    clock: Box<dyn Clock>,
    hostname: Box<dyn HostnameSource>,
    device_vendor: String,
    device_product: String,
    device_version: String,
}

impl<W: Write> fmt::Debug for Logger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("cef_version", &self.cef_version)
            .field("syslog_header", &self.syslog_header)
            .field("device_vendor", &self.device_vendor)
            .field("device_product", &self.device_product)
            .field("device_version", &self.device_version)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Logger<W> {
    /// Create a CEF version 1 logger with the syslog envelope enabled
    pub fn new(
        out: W,
        device_vendor: impl Into<String>,
        device_product: impl Into<String>,
        device_version: impl Into<String>,
    ) -> Self {
        LoggerBuilder::new(device_vendor, device_product, device_version).build(out)
    }

    /// Configured CEF version
    pub fn cef_version(&self) -> CefVersion {
        self.cef_version
    }

    /// Whether the syslog envelope is written
    pub fn syslog_header(&self) -> bool {
        self.syslog_header
    }

    /// Device vendor
    pub fn device_vendor(&self) -> &str {
        &self.device_vendor
    }

    /// Device product
    pub fn device_product(&self) -> &str {
        &self.device_product
    }

    /// Device version
    pub fn device_version(&self) -> &str {
        &self.device_version
    }

    /// Borrow the sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Mutably borrow the sink
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consume the logger, returning the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Build the full output line without writing it
    pub fn format_line(
        &self,
        device_event_class_id: &str,
        name: &str,
        severity: &str,
        extensions: &Extensions,
    ) -> Result<String> {
        let mut line = String::with_capacity(128);

        if self.syslog_header {
            let stamp = self.clock.now().format(SYSLOG_TIMESTAMP_FORMAT);
            let hostname = self
                .hostname
                .hostname()
                .map_err(CefError::HostnameUnavailable)?;
            let _ = write!(line, "{} {} ", stamp, hostname);
        }

        let _ = write!(
            line,
            "CEF:{}|{}|{}|{}|{}|{}|{}|",
            self.cef_version.as_u8(),
            escape_header_field_cow(&self.device_vendor),
            escape_header_field_cow(&self.device_product),
            escape_header_field_cow(&self.device_version),
            escape_header_field_cow(device_event_class_id),
            escape_header_field_cow(name),
            escape_header_field_cow(severity),
        );
        extensions.encode_into(&mut line);

        Ok(line)
    }

    /// Log a CEF event to the configured sink
    pub fn log(
        &mut self,
        device_event_class_id: &str,
        name: &str,
        severity: &str,
        extensions: &Extensions,
    ) -> Result<()> {
        let line = self.format_line(device_event_class_id, name, severity, extensions)?;
        trace!(bytes = line.len(), "writing CEF event");
        self.out
            .write_all(line.as_bytes())
            .map_err(CefError::SinkWriteFailed)
    }

    /// Log a prepared [`Event`]
    pub fn log_event(&mut self, event: &Event) -> Result<()> {
        self.log(
            &event.device_event_class_id,
            &event.name,
            &event.severity,
            &event.extensions,
        )
    }

    /// Log with an explicit [`Severity`] keyword
    pub fn log_severity(
        &mut self,
        device_event_class_id: &str,
        name: &str,
        severity: Severity,
        extensions: &Extensions,
    ) -> Result<()> {
        self.log(device_event_class_id, name, severity.as_str(), extensions)
    }

    /// Log with `Unknown` severity
    pub fn log_unknown(&mut self, device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
        self.log_severity(device_event_class_id, name, Severity::Unknown, extensions)
    }

    /// Log with `Low` severity
    pub fn log_low(&mut self, device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
        self.log_severity(device_event_class_id, name, Severity::Low, extensions)
    }

    /// Log with `Medium` severity
    pub fn log_medium(&mut self, device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
        self.log_severity(device_event_class_id, name, Severity::Medium, extensions)
    }

    /// Log with `High` severity
    pub fn log_high(&mut self, device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
        self.log_severity(device_event_class_id, name, Severity::High, extensions)
    }

    /// Log with `Very-High` severity
    pub fn log_very_high(&mut self, device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
        self.log_severity(device_event_class_id, name, Severity::VeryHigh, extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticHostname;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use std::io;

    fn test_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 9)
            .and_then(|d| d.and_hms_opt(11, 45, 20))
            .unwrap()
    }

    struct ErrorWriter;

    impl Write for ErrorWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "underlying writer error"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn pinned(vendor: &str, product: &str, version: &str) -> LoggerBuilder {
        LoggerBuilder::new(vendor, product, version)
            .clock(test_time)
            .hostname_source(StaticHostname::new("testhost"))
    }

    #[test]
    fn test_simple() {
        let mut logger = pinned("cyberdyne", "skynet", "0.9.0").build(Vec::new());
        logger
            .log("1000", "testevent", "Low", &Extensions::default())
            .unwrap();
        assert_eq!(
            String::from_utf8(logger.into_inner()).unwrap(),
            "Nov 9 11:45:20 testhost CEF:1|cyberdyne|skynet|0.9.0|1000|testevent|Low|"
        );
    }

    #[test]
    fn test_omit_syslog_and_cef0() {
        let mut logger = pinned("cyberdyne", "skynet", "0.9.1")
            .omit_syslog_header()
            .cef_version(CefVersion::V0)
            .build(Vec::new());
        logger
            .log_low("1001", "testeventtofile", &Extensions::default())
            .unwrap();
        assert_eq!(
            String::from_utf8(logger.into_inner()).unwrap(),
            "CEF:0|cyberdyne|skynet|0.9.1|1001|testeventtofile|Low|"
        );
    }

    #[test]
    fn test_header_fields_escaped() {
        let logger = pinned("cyber|dyne", "sky\\net", "").omit_syslog_header().build(Vec::new());
        let line = logger
            .format_line("", "a|b", "High", &Extensions::default())
            .unwrap();
        assert_eq!(line, "CEF:1|cyber\\|dyne|sky\\\\net|||a\\|b|High|");
    }

    #[test]
    fn test_extensions_follow_header() {
        let logger = pinned("v", "p", "1").omit_syslog_header().build(Vec::new());
        let ext = Extensions {
            message: "a=b".to_string(),
            ..Default::default()
        };
        let line = logger.format_line("1", "n", "5", &ext).unwrap();
        assert_eq!(line, "CEF:1|v|p|1|1|n|5|msg=a\\=b");
    }

    #[test]
    fn test_sink_error() {
        let mut logger = pinned("not", "relevant", "1").omit_syslog_header().build(ErrorWriter);
        let err = logger
            .log_very_high("9001", "scanner", &Extensions::default())
            .unwrap_err();
        assert!(matches!(err, CefError::SinkWriteFailed(_)));
        assert_eq!(err.to_string(), "failed to write log: underlying writer error");
    }

    #[test]
    fn test_hostname_error_aborts_before_write() {
        let mut logger = LoggerBuilder::new("v", "p", "1")
            .clock(test_time)
            .hostname_source(|| -> io::Result<String> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no hostname"))
            })
            .build(Vec::new());
        let err = logger.log_low("1", "n", &Extensions::default()).unwrap_err();
        assert!(matches!(err, CefError::HostnameUnavailable(_)));
        assert!(logger.get_ref().is_empty());
    }

    #[test]
    fn test_hostname_not_consulted_without_envelope() {
        let mut logger = LoggerBuilder::new("v", "p", "1")
            .omit_syslog_header()
            .hostname_source(|| -> io::Result<String> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no hostname"))
            })
            .build(Vec::new());
        assert!(logger.log_low("1", "n", &Extensions::default()).is_ok());
    }

    #[test]
    fn test_invalid_severity_is_embedded() {
        let logger = pinned("v", "p", "1").omit_syslog_header().build(Vec::new());
        let line = logger
            .format_line("1", "n", "Catastrophic", &Extensions::default())
            .unwrap();
        assert_eq!(line, "CEF:1|v|p|1|1|n|Catastrophic|");
    }

    #[test]
    fn test_two_digit_day() {
        let logger = LoggerBuilder::new("v", "p", "1")
            .clock(|| {
                NaiveDate::from_ymd_opt(2024, 1, 23)
                    .and_then(|d| d.and_hms_opt(3, 4, 5))
                    .unwrap()
            })
            .hostname_source(StaticHostname::new("h"))
            .build(Vec::new());
        let line = logger.format_line("1", "n", "Low", &Extensions::default()).unwrap();
        assert!(line.starts_with("Jan 23 03:04:05 h CEF:1|"));
    }

    #[test]
    fn test_log_event() {
        let mut logger = pinned("v", "p", "1").omit_syslog_header().build(Vec::new());
        let event = Event::new("42", "login", "Medium").with_extensions(Extensions {
            source_user_name: "alice".to_string(),
            ..Default::default()
        });
        logger.log_event(&event).unwrap();
        assert_eq!(logger.get_ref().as_slice(), b"CEF:1|v|p|1|42|login|Medium|suser=alice");
    }

    #[test]
    fn test_new_defaults() {
        let logger = Logger::new(Vec::new(), "Black Mesa", "Cascade Resonator", "1.0.3");
        assert_eq!(logger.cef_version(), CefVersion::V1);
        assert!(logger.syslog_header());
        assert_eq!(logger.device_vendor(), "Black Mesa");
        assert_eq!(logger.device_product(), "Cascade Resonator");
        assert_eq!(logger.device_version(), "1.0.3");
    }
}
