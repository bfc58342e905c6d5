//! Clock and hostname providers used for the syslog envelope

use chrono::{Local, NaiveDateTime};
use std::io;

/// Supplies the wall-clock time stamped on each envelope
pub trait Clock: Send + Sync {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// Supplies the hostname written into each envelope
pub trait HostnameSource: Send + Sync {
    /// Local hostname
    fn hostname(&self) -> io::Result<String>;
}

/// System local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// Hostname reported by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> io::Result<String> {
        hostname::get()?.into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("hostname is not valid UTF-8: {:?}", raw),
            )
        })
    }
}

/// Fixed hostname, for hosts whose reported name should be overridden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHostname(pub String);

impl StaticHostname {
    /// Create a source that always returns `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl HostnameSource for StaticHostname {
    fn hostname(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

impl<F> HostnameSource for F
where
    F: Fn() -> io::Result<String> + Send + Sync,
{
    fn hostname(&self) -> io::Result<String> {
        self()
    }
}
