//! Process-wide default logger
//!
//! Passing a [`Logger`] to call sites is preferred. For code that cannot
//! thread one through, this module keeps a single, explicitly installed
//! handle. Nothing is installed until [`install`] is called, and logging
//! before that fails with [`CefError::DefaultLoggerUnset`].
//!
//! Calls are serialized by an internal mutex, so the sink sees one line at
//! a time. Replacing the handle while another thread is logging is safe but
//! not ordered: the in-flight call finishes on whichever logger it locked.

use crate::error::{CefError, Result};
use crate::extensions::Extensions;
use crate::logger::{BoxedSink, Logger};
use crate::severity::Severity;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Logger type held by the default handle
pub type DefaultLogger = Logger<BoxedSink>;

static DEFAULT_LOGGER: Lazy<Mutex<Option<DefaultLogger>>> = Lazy::new(|| Mutex::new(None));

/// Install `logger` as the default, returning the one it replaces
pub fn install(logger: DefaultLogger) -> Option<DefaultLogger> {
    DEFAULT_LOGGER.lock().replace(logger)
}

/// Remove and return the default logger
pub fn take() -> Option<DefaultLogger> {
    DEFAULT_LOGGER.lock().take()
}

/// True when a default logger is installed
pub fn is_installed() -> bool {
    DEFAULT_LOGGER.lock().is_some()
}

/// Run `f` against the default logger while holding its lock
pub fn with<R>(f: impl FnOnce(&mut DefaultLogger) -> Result<R>) -> Result<R> {
    let mut guard = DEFAULT_LOGGER.lock();
    let logger = guard.as_mut().ok_or(CefError::DefaultLoggerUnset)?;
    f(logger)
}

/// Log through the default logger
pub fn log(device_event_class_id: &str, name: &str, severity: &str, extensions: &Extensions) -> Result<()> {
    with(|logger| logger.log(device_event_class_id, name, severity, extensions))
}

fn log_severity(device_event_class_id: &str, name: &str, severity: Severity, extensions: &Extensions) -> Result<()> {
    with(|logger| logger.log_severity(device_event_class_id, name, severity, extensions))
}

/// Log with `Unknown` severity through the default logger
pub fn log_unknown(device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
    log_severity(device_event_class_id, name, Severity::Unknown, extensions)
}

/// Log with `Low` severity through the default logger
pub fn log_low(device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
    log_severity(device_event_class_id, name, Severity::Low, extensions)
}

/// Log with `Medium` severity through the default logger
pub fn log_medium(device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
    log_severity(device_event_class_id, name, Severity::Medium, extensions)
}

/// Log with `High` severity through the default logger
pub fn log_high(device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
    log_severity(device_event_class_id, name, Severity::High, extensions)
}

/// Log with `Very-High` severity through the default logger
pub fn log_very_high(device_event_class_id: &str, name: &str, extensions: &Extensions) -> Result<()> {
    log_severity(device_event_class_id, name, Severity::VeryHigh, extensions)
}
