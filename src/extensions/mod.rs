//! CEF extension fields
//!
//! [`Extensions`] holds every well-known extension field as an optional,
//! typed value plus a free-form map of vendor specific pairs. A field is
//! written only when it is set according to its type:
//!
//! - strings are skipped when empty
//! - `Option` values are skipped when `None`
//! - [`MacAddress`] is skipped when it has no octets
//! - `base_event_count` is written only when greater than one
//! - `event_type` is skipped for [`EventType::Base`]
//!
//! Known fields are written in a fixed order grouped by category (general,
//! destination, device, file, source). Custom extensions follow in
//! unspecified order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use url::Url;

/// Encoder for extension key/value tokens
pub mod encode;

/// Value types used by extension fields
pub mod types;

pub use encode::ExtensionWriter;
pub use types::{DeviceDirection, EventType, MacAddress};

/// Extension section of a CEF event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    // General
    /// `act`: action taken by the device
    pub device_action: String,
    /// `app`: application level protocol
    pub application_protocol: String,
    /// `cnt`: number of times the same event was observed
    pub base_event_count: u64,
    /// `in`: bytes transferred inbound
    pub bytes_in: Option<u64>,
    /// `out`: bytes transferred outbound
    pub bytes_out: Option<u64>,
    /// `end`: time the activity ended
    pub end_time: Option<DateTime<Utc>>,
    /// `start`: time the activity started
    pub start_time: Option<DateTime<Utc>>,
    /// `rt`: time the event was received by the device
    pub device_receipt_time: Option<DateTime<Utc>>,
    /// `externalId`
    pub external_id: String,
    /// `eventId`
    pub event_id: Option<u64>,
    /// `msg`
    pub message: String,
    /// `outcome`
    pub event_outcome: String,
    /// `proto`: transport protocol
    pub transport_protocol: String,
    /// `reason`
    pub reason: String,
    /// `request`: URL accessed
    pub request_url: Option<Url>,
    /// `requestClientApplication`: user agent
    pub request_client_application: String,
    /// `requestContext`
    pub request_context: String,
    /// `requestCookies`
    pub request_cookies: String,
    /// `requestMethod`
    pub request_method: String,
    /// `cat`: device event category
    pub device_event_category: String,
    /// `catdt`: category device type
    pub category_device_type: String,
    /// `type`
    pub event_type: EventType,

    // Destination
    /// `destinationDnsDomain`
    pub destination_dns_domain: String,
    /// `destinationServiceName`
    pub destination_service_name: String,
    /// `destinationTranslatedAddress`
    pub destination_translated_address: Option<IpAddr>,
    /// `destinationTranslatedPort`
    pub destination_translated_port: Option<u16>,
    /// `dhost`
    pub destination_host_name: String,
    /// `dmac`
    pub destination_mac_address: MacAddress,
    /// `dntdom`
    pub destination_nt_domain: String,
    /// `dpid`
    pub destination_process_id: Option<u32>,
    /// `dpriv`
    pub destination_user_privileges: String,
    /// `dproc`
    pub destination_process_name: String,
    /// `dpt`
    pub destination_port: Option<u16>,
    /// `dst`
    pub destination_address: Option<IpAddr>,
    /// `duid`
    pub destination_user_id: String,
    /// `duser`
    pub destination_user_name: String,
    /// `dlat`
    pub destination_latitude: Option<f64>,
    /// `dlong`
    pub destination_longitude: Option<f64>,

    // Device
    /// `deviceDirection`
    pub device_direction: Option<DeviceDirection>,
    /// `deviceDnsDomain`
    pub device_dns_domain: String,
    /// `deviceExternalId`
    pub device_external_id: String,
    /// `deviceFacility`
    pub device_facility: String,
    /// `deviceInboundInterface`
    pub device_inbound_interface: String,
    /// `deviceNtDomain`
    pub device_nt_domain: String,
    /// `deviceOutboundInterface`
    pub device_outbound_interface: String,
    /// `devicePayloadId`
    pub device_payload_id: String,
    /// `deviceProcessName`
    pub device_process_name: String,
    /// `deviceTranslatedAddress`
    pub device_translated_address: Option<IpAddr>,
    /// `dvc`
    pub device_address: Option<IpAddr>,
    /// `dvchost`
    pub device_host_name: String,
    /// `dvcmac`
    pub device_mac_address: MacAddress,
    /// `dvcpid`
    pub device_process_id: Option<u32>,
    /// `dtz`
    pub device_time_zone: String,
    /// `cs1`
    pub device_custom_string1: String,
    /// `cs1Label`
    pub device_custom_string1_label: String,
    /// `cs2`
    pub device_custom_string2: String,
    /// `cs2Label`
    pub device_custom_string2_label: String,
    /// `cs3`
    pub device_custom_string3: String,
    /// `cs3Label`
    pub device_custom_string3_label: String,
    /// `cs4`
    pub device_custom_string4: String,
    /// `cs4Label`
    pub device_custom_string4_label: String,
    /// `cs5`
    pub device_custom_string5: String,
    /// `cs5Label`
    pub device_custom_string5_label: String,
    /// `cs6`
    pub device_custom_string6: String,
    /// `cs6Label`
    pub device_custom_string6_label: String,
    /// `cn1`
    pub device_custom_number1: Option<i64>,
    /// `cn1Label`
    pub device_custom_number1_label: String,
    /// `cn2`
    pub device_custom_number2: Option<i64>,
    /// `cn2Label`
    pub device_custom_number2_label: String,
    /// `cn3`
    pub device_custom_number3: Option<i64>,
    /// `cn3Label`
    pub device_custom_number3_label: String,
    /// `cfp1`
    pub device_custom_floating_point1: Option<f64>,
    /// `cfp1Label`
    pub device_custom_floating_point1_label: String,
    /// `cfp2`
    pub device_custom_floating_point2: Option<f64>,
    /// `cfp2Label`
    pub device_custom_floating_point2_label: String,
    /// `cfp3`
    pub device_custom_floating_point3: Option<f64>,
    /// `cfp3Label`
    pub device_custom_floating_point3_label: String,
    /// `cfp4`
    pub device_custom_floating_point4: Option<f64>,
    /// `cfp4Label`
    pub device_custom_floating_point4_label: String,
    /// `c6a1`
    pub device_custom_ipv6_address1: Option<Ipv6Addr>,
    /// `c6a1Label`
    pub device_custom_ipv6_address1_label: String,
    /// `c6a3`
    pub device_custom_ipv6_address3: Option<Ipv6Addr>,
    /// `c6a3Label`
    pub device_custom_ipv6_address3_label: String,
    /// `c6a4`
    pub device_custom_ipv6_address4: Option<Ipv6Addr>,
    /// `c6a4Label`
    pub device_custom_ipv6_address4_label: String,
    /// `deviceCustomDate1`
    pub device_custom_date1: Option<DateTime<Utc>>,
    /// `deviceCustomDate1Label`
    pub device_custom_date1_label: String,
    /// `deviceCustomDate2`
    pub device_custom_date2: Option<DateTime<Utc>>,
    /// `deviceCustomDate2Label`
    pub device_custom_date2_label: String,
    /// `flexString1`
    pub flex_string1: String,
    /// `flexString1Label`
    pub flex_string1_label: String,
    /// `flexString2`
    pub flex_string2: String,
    /// `flexString2Label`
    pub flex_string2_label: String,
    /// `flexDate1`
    pub flex_date1: Option<DateTime<Utc>>,
    /// `flexDate1Label`
    pub flex_date1_label: String,

    // File
    /// `fileCreateTime`
    pub file_create_time: Option<DateTime<Utc>>,
    /// `fileHash`
    pub file_hash: String,
    /// `fileId`
    pub file_id: String,
    /// `fileModificationTime`
    pub file_modification_time: Option<DateTime<Utc>>,
    /// `fname`
    pub file_name: String,
    /// `filePath`
    pub file_path: String,
    /// `filePermission`
    pub file_permission: String,
    /// `fsize`
    pub file_size: Option<u64>,
    /// `fileType`
    pub file_type: String,
    /// `oldFileCreateTime`
    pub old_file_create_time: Option<DateTime<Utc>>,
    /// `oldFileHash`
    pub old_file_hash: String,
    /// `oldFileId`
    pub old_file_id: String,
    /// `oldFileModificationTime`
    pub old_file_modification_time: Option<DateTime<Utc>>,
    /// `oldFileName`
    pub old_file_name: String,
    /// `oldFilePath`
    pub old_file_path: String,
    /// `oldFilePermission`
    pub old_file_permission: String,
    /// `oldFileSize`
    pub old_file_size: Option<u64>,
    /// `oldFileType`
    pub old_file_type: String,

    // Source
    /// `sourceDnsDomain`
    pub source_dns_domain: String,
    /// `sourceServiceName`
    pub source_service_name: String,
    /// `sourceTranslatedAddress`
    pub source_translated_address: Option<IpAddr>,
    /// `sourceTranslatedPort`
    pub source_translated_port: Option<u16>,
    /// `shost`
    pub source_host_name: String,
    /// `smac`
    pub source_mac_address: MacAddress,
    /// `sntdom`
    pub source_nt_domain: String,
    /// `spid`
    pub source_process_id: Option<u32>,
    /// `spriv`
    pub source_user_privileges: String,
    /// `sproc`
    pub source_process_name: String,
    /// `spt`
    pub source_port: Option<u16>,
    /// `src`
    pub source_address: Option<IpAddr>,
    /// `suid`
    pub source_user_id: String,
    /// `suser`
    pub source_user_name: String,
    /// `slat`
    pub source_latitude: Option<f64>,
    /// `slong`
    pub source_longitude: Option<f64>,

    /// Non-standard pairs. Keys must not collide with the reserved names
    /// above. Emission order is unspecified.
    pub custom_extensions: HashMap<String, String>,
}

impl Extensions {
    /// Create an empty extension set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom extension pair
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_extensions.insert(key.into(), value.into());
        self
    }

    /// Encode into a space separated `key=value` string
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    /// Append the encoded tokens to `out`
    pub fn encode_into(&self, out: &mut String) {
        let start = out.len();
        let mut writer = ExtensionWriter::new(out);
        self.write_general(&mut writer);
        self.write_destination(&mut writer);
        self.write_device(&mut writer);
        self.write_file(&mut writer);
        self.write_source(&mut writer);
        writer.custom(&self.custom_extensions);

        // the section never starts or ends with whitespace
        let trimmed_len = out[start..].trim_end().len();
        out.truncate(start + trimmed_len);
        let leading = out[start..].len() - out[start..].trim_start().len();
        out.drain(start..start + leading);
    }
}

impl fmt::Display for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
