//! CEF severity keywords and validation
//!
//! The severity header slot accepts one of five keywords or an integer in
//! `0..=10`. Emission never validates on its own; callers that want strict
//! input call [`validate_severity`] before logging.

use crate::error::{CefError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keyword for unknown severity
pub const UNKNOWN_SEVERITY: &str = "Unknown";
/// Keyword for low severity
pub const LOW_SEVERITY: &str = "Low";
/// Keyword for medium severity
pub const MEDIUM_SEVERITY: &str = "Medium";
/// Keyword for high severity
pub const HIGH_SEVERITY: &str = "High";
/// Keyword for very high severity
pub const VERY_HIGH_SEVERITY: &str = "Very-High";

/// Highest accepted numeric severity
pub const MAX_NUMERIC_SEVERITY: i64 = 10;

/// Canonical severity keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// `Unknown`
    Unknown,
    /// `Low`
    Low,
    /// `Medium`
    Medium,
    /// `High`
    High,
    /// `Very-High`
    #[serde(rename = "Very-High")]
    VeryHigh,
}

impl Severity {
    /// All keywords in ascending order
    pub const ALL: [Severity; 5] = [
        Severity::Unknown,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::VeryHigh,
    ];

    /// The header text for this keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => UNKNOWN_SEVERITY,
            Severity::Low => LOW_SEVERITY,
            Severity::Medium => MEDIUM_SEVERITY,
            Severity::High => HIGH_SEVERITY,
            Severity::VeryHigh => VERY_HIGH_SEVERITY,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CefError;

    fn from_str(s: &str) -> Result<Self> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| CefError::InvalidSeverity(s.to_string()))
    }
}

impl AsRef<str> for Severity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Check that `sev` is a severity keyword or a base-10 integer in `0..=10`.
///
/// Keywords are matched exactly and case-sensitively.
pub fn validate_severity(sev: &str) -> Result<()> {
    if sev.parse::<Severity>().is_ok() {
        return Ok(());
    }

    match sev.parse::<i64>() {
        Ok(v) if (0..=MAX_NUMERIC_SEVERITY).contains(&v) => Ok(()),
        _ => Err(CefError::InvalidSeverity(sev.to_string())),
    }
}
