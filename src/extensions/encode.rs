//! Extension encoding
//!
//! Every known field goes through one of the typed writer methods, which
//! decide whether the field is set and how its value is rendered. The
//! order of calls below is the wire order.

use super::{Extensions, MacAddress};
use crate::escape::escape_extension_field_cow;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::{Display, Write};
use url::Url;

/// Appends `key=value` tokens to a string, separated by single spaces
pub struct ExtensionWriter<'a> {
    out: &'a mut String,
    start: usize,
}

impl<'a> ExtensionWriter<'a> {
    /// Create a writer appending to `out`
    pub fn new(out: &'a mut String) -> Self {
        let start = out.len();
        Self { out, start }
    }

    fn separator(&mut self) {
        if self.out.len() > self.start {
            self.out.push(' ');
        }
    }

    fn display(&mut self, key: &str, value: impl Display) {
        self.separator();
        // writing into a String cannot fail
        let _ = write!(self.out, "{}={}", key, value);
    }

    /// Escaped string value, skipped when empty
    pub fn string(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.separator();
        self.out.push_str(key);
        self.out.push('=');
        self.out.push_str(&escape_extension_field_cow(value));
    }

    /// Numeric, address or float value, skipped when `None`
    pub fn value<T: Display>(&mut self, key: &str, value: Option<T>) {
        if let Some(v) = value {
            self.display(key, v);
        }
    }

    /// Milliseconds since the Unix epoch, skipped when `None`
    pub fn time(&mut self, key: &str, value: Option<&DateTime<Utc>>) {
        if let Some(ts) = value {
            self.display(key, ts.timestamp_millis());
        }
    }

    /// Colon separated hex, skipped for the empty address
    pub fn mac(&mut self, key: &str, value: &MacAddress) {
        if !value.is_empty() {
            self.display(key, value);
        }
    }

    /// Serialized and escaped URL, skipped when `None`
    pub fn url(&mut self, key: &str, value: Option<&Url>) {
        if let Some(url) = value {
            self.string(key, url.as_str());
        }
    }

    /// Free-form pairs; key and value are both escaped
    pub fn custom(&mut self, extras: &HashMap<String, String>) {
        for (key, value) in extras {
            self.separator();
            self.out.push_str(&escape_extension_field_cow(key));
            self.out.push('=');
            self.out.push_str(&escape_extension_field_cow(value));
        }
    }
}

impl Extensions {
    pub(super) fn write_general(&self, w: &mut ExtensionWriter<'_>) {
        w.string("act", &self.device_action);
        w.string("app", &self.application_protocol);
        // a count of one is implied
        if self.base_event_count > 1 {
            w.display("cnt", self.base_event_count);
        }
        w.value("in", self.bytes_in);
        w.value("out", self.bytes_out);
        w.time("end", self.end_time.as_ref());
        w.time("start", self.start_time.as_ref());
        w.time("rt", self.device_receipt_time.as_ref());
        w.string("externalId", &self.external_id);
        w.value("eventId", self.event_id);
        w.string("msg", &self.message);
        w.string("outcome", &self.event_outcome);
        w.string("proto", &self.transport_protocol);
        w.string("reason", &self.reason);
        w.url("request", self.request_url.as_ref());
        w.string("requestClientApplication", &self.request_client_application);
        w.string("requestContext", &self.request_context);
        w.string("requestCookies", &self.request_cookies);
        w.string("requestMethod", &self.request_method);
        w.string("cat", &self.device_event_category);
        w.string("catdt", &self.category_device_type);
        if !self.event_type.is_base() {
            w.display("type", self.event_type.as_u8());
        }
    }

    pub(super) fn write_destination(&self, w: &mut ExtensionWriter<'_>) {
        w.string("destinationDnsDomain", &self.destination_dns_domain);
        w.string("destinationServiceName", &self.destination_service_name);
        w.value("destinationTranslatedAddress", self.destination_translated_address);
        w.value("destinationTranslatedPort", self.destination_translated_port);
        w.string("dhost", &self.destination_host_name);
        w.mac("dmac", &self.destination_mac_address);
        w.string("dntdom", &self.destination_nt_domain);
        w.value("dpid", self.destination_process_id);
        w.string("dpriv", &self.destination_user_privileges);
        w.string("dproc", &self.destination_process_name);
        w.value("dpt", self.destination_port);
        w.value("dst", self.destination_address);
        w.string("duid", &self.destination_user_id);
        w.string("duser", &self.destination_user_name);
        w.value("dlat", self.destination_latitude);
        w.value("dlong", self.destination_longitude);
    }

    pub(super) fn write_device(&self, w: &mut ExtensionWriter<'_>) {
        w.value("deviceDirection", self.device_direction.map(|d| d.as_u8()));
        w.string("deviceDnsDomain", &self.device_dns_domain);
        w.string("deviceExternalId", &self.device_external_id);
        w.string("deviceFacility", &self.device_facility);
        w.string("deviceInboundInterface", &self.device_inbound_interface);
        w.string("deviceNtDomain", &self.device_nt_domain);
        w.string("deviceOutboundInterface", &self.device_outbound_interface);
        w.string("devicePayloadId", &self.device_payload_id);
        w.string("deviceProcessName", &self.device_process_name);
        w.value("deviceTranslatedAddress", self.device_translated_address);
        w.value("dvc", self.device_address);
        w.string("dvchost", &self.device_host_name);
        w.mac("dvcmac", &self.device_mac_address);
        w.value("dvcpid", self.device_process_id);
        w.string("dtz", &self.device_time_zone);

        w.string("cs1", &self.device_custom_string1);
        w.string("cs1Label", &self.device_custom_string1_label);
        w.string("cs2", &self.device_custom_string2);
        w.string("cs2Label", &self.device_custom_string2_label);
        w.string("cs3", &self.device_custom_string3);
        w.string("cs3Label", &self.device_custom_string3_label);
        w.string("cs4", &self.device_custom_string4);
        w.string("cs4Label", &self.device_custom_string4_label);
        w.string("cs5", &self.device_custom_string5);
        w.string("cs5Label", &self.device_custom_string5_label);
        w.string("cs6", &self.device_custom_string6);
        w.string("cs6Label", &self.device_custom_string6_label);

        w.value("cn1", self.device_custom_number1);
        w.string("cn1Label", &self.device_custom_number1_label);
        w.value("cn2", self.device_custom_number2);
        w.string("cn2Label", &self.device_custom_number2_label);
        w.value("cn3", self.device_custom_number3);
        w.string("cn3Label", &self.device_custom_number3_label);

        w.value("cfp1", self.device_custom_floating_point1);
        w.string("cfp1Label", &self.device_custom_floating_point1_label);
        w.value("cfp2", self.device_custom_floating_point2);
        w.string("cfp2Label", &self.device_custom_floating_point2_label);
        w.value("cfp3", self.device_custom_floating_point3);
        w.string("cfp3Label", &self.device_custom_floating_point3_label);
        w.value("cfp4", self.device_custom_floating_point4);
        w.string("cfp4Label", &self.device_custom_floating_point4_label);

        w.value("c6a1", self.device_custom_ipv6_address1);
        w.string("c6a1Label", &self.device_custom_ipv6_address1_label);
        w.value("c6a3", self.device_custom_ipv6_address3);
        w.string("c6a3Label", &self.device_custom_ipv6_address3_label);
        w.value("c6a4", self.device_custom_ipv6_address4);
        w.string("c6a4Label", &self.device_custom_ipv6_address4_label);

        w.time("deviceCustomDate1", self.device_custom_date1.as_ref());
        w.string("deviceCustomDate1Label", &self.device_custom_date1_label);
        w.time("deviceCustomDate2", self.device_custom_date2.as_ref());
        w.string("deviceCustomDate2Label", &self.device_custom_date2_label);

        w.string("flexString1", &self.flex_string1);
        w.string("flexString1Label", &self.flex_string1_label);
        w.string("flexString2", &self.flex_string2);
        w.string("flexString2Label", &self.flex_string2_label);
        w.time("flexDate1", self.flex_date1.as_ref());
        w.string("flexDate1Label", &self.flex_date1_label);
    }

    pub(super) fn write_file(&self, w: &mut ExtensionWriter<'_>) {
        w.time("fileCreateTime", self.file_create_time.as_ref());
        w.string("fileHash", &self.file_hash);
        w.string("fileId", &self.file_id);
        w.time("fileModificationTime", self.file_modification_time.as_ref());
        w.string("fname", &self.file_name);
        w.string("filePath", &self.file_path);
        w.string("filePermission", &self.file_permission);
        w.value("fsize", self.file_size);
        w.string("fileType", &self.file_type);

        w.time("oldFileCreateTime", self.old_file_create_time.as_ref());
        w.string("oldFileHash", &self.old_file_hash);
        w.string("oldFileId", &self.old_file_id);
        w.time("oldFileModificationTime", self.old_file_modification_time.as_ref());
        w.string("oldFileName", &self.old_file_name);
        w.string("oldFilePath", &self.old_file_path);
        w.string("oldFilePermission", &self.old_file_permission);
        w.value("oldFileSize", self.old_file_size);
        w.string("oldFileType", &self.old_file_type);
    }

    pub(super) fn write_source(&self, w: &mut ExtensionWriter<'_>) {
        w.string("sourceDnsDomain", &self.source_dns_domain);
        w.string("sourceServiceName", &self.source_service_name);
        w.value("sourceTranslatedAddress", self.source_translated_address);
        w.value("sourceTranslatedPort", self.source_translated_port);
        w.string("shost", &self.source_host_name);
        w.mac("smac", &self.source_mac_address);
        w.string("sntdom", &self.source_nt_domain);
        w.value("spid", self.source_process_id);
        w.string("spriv", &self.source_user_privileges);
        w.string("sproc", &self.source_process_name);
        w.value("spt", self.source_port);
        w.value("src", self.source_address);
        w.string("suid", &self.source_user_id);
        w.string("suser", &self.source_user_name);
        w.value("slat", self.source_latitude);
        w.value("slong", self.source_longitude);
    }
}
