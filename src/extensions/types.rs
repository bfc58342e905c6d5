//! Value types for extension fields that have no direct std equivalent

use crate::error::{CefError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hardware (MAC) address of arbitrary length
///
/// An empty address means "unset" and is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(Vec<u8>);

impl MacAddress {
    /// Create an address from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw address bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of octets in the address
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no octets are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for MacAddress {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for MacAddress {
    type Err = CefError;

    /// Parse colon or hyphen separated hex octets, e.g. `00:1a:2b:3c:4d:5e`.
    /// The empty string parses to the unset address.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::default());
        }

        let sep = if s.contains('-') { '-' } else { ':' };
        s.split(sep)
            .map(|octet| {
                if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(CefError::InvalidMacAddress(s.to_string()));
                }
                u8::from_str_radix(octet, 16).map_err(|_| CefError::InvalidMacAddress(s.to_string()))
            })
            .collect::<Result<Vec<u8>>>()
            .map(Self)
    }
}

impl Serialize for MacAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of traffic as seen by the reporting device (`deviceDirection`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DeviceDirection {
    /// Traffic entering the device
    Inbound = 0,
    /// Traffic leaving the device
    Outbound = 1,
}

impl DeviceDirection {
    /// Wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Event kind (`type`). [`EventType::Base`] is implied and never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EventType {
    /// A single, unaggregated event
    #[default]
    Base = 0,
    /// Several events rolled into one
    Aggregated = 1,
    /// Output of a correlation rule
    Correlation = 2,
    /// Action taken in response to an event
    Action = 3,
}

impl EventType {
    /// Wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// True for the implied base type
    pub fn is_base(self) -> bool {
        self == EventType::Base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display() {
        let mac = MacAddress::from([0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
        assert_eq!(mac.to_string(), "00:1a:2b:3c:4d:5e");
        assert_eq!(MacAddress::default().to_string(), "");
    }

    #[test]
    fn test_mac_parse() {
        let mac: MacAddress = "00-1A-2b-3c-4d-5E".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
        assert!("".parse::<MacAddress>().unwrap().is_empty());
        assert!("00:1a:2".parse::<MacAddress>().is_err());
        assert!("zz:00".parse::<MacAddress>().is_err());
    }

    #[test]
    fn test_mac_serde() {
        let mac = MacAddress::from([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        let json = serde_json::to_string(&mac).unwrap();
        assert_eq!(json, "\"de:ad:be:ef:00:01\"");
        let back: MacAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mac);
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(DeviceDirection::Inbound.as_u8(), 0);
        assert_eq!(DeviceDirection::Outbound.as_u8(), 1);
        assert!(EventType::default().is_base());
        assert_eq!(EventType::Correlation.as_u8(), 2);
    }

    #[test]
    fn test_mac_parse_rejects_signed_octets() {
        assert!(matches!(
            "+f:00".parse::<MacAddress>(),
            Err(CefError::InvalidMacAddress(_))
        ));
        assert!("0x:00".parse::<MacAddress>().is_err());
        assert!(" a:00".parse::<MacAddress>().is_err());
    }
}
