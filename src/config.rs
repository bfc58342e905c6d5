//! Logger configuration
//!
//! Configuration is fixed when a [`Logger`](crate::Logger) is built. It can
//! be assembled in code through [`LoggerBuilder`](crate::LoggerBuilder), or
//! loaded from YAML and overridden from `CEF_*` environment variables.

use crate::error::{CefError, Result};
use crate::logger::LoggerBuilder;
use crate::source::StaticHostname;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported CEF format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CefVersion {
    /// `CEF:0`
    V0,
    /// `CEF:1`
    #[default]
    V1,
}

impl CefVersion {
    /// Numeric value written after `CEF:`
    pub fn as_u8(self) -> u8 {
        match self {
            CefVersion::V0 => 0,
            CefVersion::V1 => 1,
        }
    }
}

impl TryFrom<u8> for CefVersion {
    type Error = CefError;

    fn try_from(ver: u8) -> Result<Self> {
        match ver {
            0 => Ok(CefVersion::V0),
            1 => Ok(CefVersion::V1),
            other => Err(CefError::InvalidCefVersion(u32::from(other))),
        }
    }
}

impl fmt::Display for CefVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Serializable logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// CEF format version, 0 or 1
    #[serde(default = "default_cef_version")]
    pub cef_version: u8,

    /// Prefix each line with a syslog style timestamp and hostname
    #[serde(default = "default_syslog_header")]
    pub syslog_header: bool,

    /// Device vendor in the CEF header
    pub device_vendor: String,

    /// Device product in the CEF header
    pub device_product: String,

    /// Device version in the CEF header
    #[serde(default)]
    pub device_version: String,

    /// Hostname for the envelope. If not specified, uses the system hostname.
    #[serde(default)]
    pub hostname: Option<String>,
}

fn default_cef_version() -> u8 {
    1
}

fn default_syslog_header() -> bool {
    true
}

impl LoggerConfig {
    /// Create a configuration with default version and envelope settings
    pub fn new(
        device_vendor: impl Into<String>,
        device_product: impl Into<String>,
        device_version: impl Into<String>,
    ) -> Self {
        Self {
            cef_version: default_cef_version(),
            syslog_header: default_syslog_header(),
            device_vendor: device_vendor.into(),
            device_product: device_product.into(),
            device_version: device_version.into(),
            hostname: None,
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Override fields from the `CEF_VERSION`, `CEF_SYSLOG_HEADER`,
    /// `CEF_DEVICE_VENDOR`, `CEF_DEVICE_PRODUCT`, `CEF_DEVICE_VERSION` and
    /// `CEF_HOSTNAME` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(ver) = std::env::var("CEF_VERSION") {
            let parsed: u32 = ver
                .trim()
                .parse()
                .map_err(|_| CefError::configuration(format!("CEF_VERSION is not a number: {}", ver)))?;
            let version = u8::try_from(parsed)
                .ok()
                .and_then(|v| CefVersion::try_from(v).ok())
                .ok_or(CefError::InvalidCefVersion(parsed))?;
            self.cef_version = version.as_u8();
        }
        if let Ok(flag) = std::env::var("CEF_SYSLOG_HEADER") {
            self.syslog_header = parse_bool(&flag).ok_or_else(|| {
                CefError::configuration(format!("CEF_SYSLOG_HEADER is not a boolean: {}", flag))
            })?;
        }
        if let Ok(vendor) = std::env::var("CEF_DEVICE_VENDOR") {
            self.device_vendor = vendor;
        }
        if let Ok(product) = std::env::var("CEF_DEVICE_PRODUCT") {
            self.device_product = product;
        }
        if let Ok(version) = std::env::var("CEF_DEVICE_VERSION") {
            self.device_version = version;
        }
        if let Ok(hostname) = std::env::var("CEF_HOSTNAME") {
            self.hostname = Some(hostname);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        CefVersion::try_from(self.cef_version)?;
        if self.device_vendor.is_empty() {
            return Err(CefError::configuration("device vendor cannot be empty"));
        }
        if self.device_product.is_empty() {
            return Err(CefError::configuration("device product cannot be empty"));
        }
        Ok(())
    }

    /// Validated builder carrying this configuration
    pub fn builder(&self) -> Result<LoggerBuilder> {
        self.validate()?;
        let version = CefVersion::try_from(self.cef_version)?;
        let mut builder = LoggerBuilder::new(
            self.device_vendor.clone(),
            self.device_product.clone(),
            self.device_version.clone(),
        )
        .cef_version(version)
        .syslog_header(self.syslog_header);
        if let Some(hostname) = &self.hostname {
            builder = builder.hostname_source(StaticHostname::new(hostname.clone()));
        }
        Ok(builder)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
