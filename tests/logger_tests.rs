//! Integration tests for CEF line emission

use cefevent::{
    CefError, CefVersion, Extensions, Logger, LoggerBuilder, Severity, StaticHostname,
};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::{self, Write};

fn test_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 9)
        .and_then(|d| d.and_hms_opt(11, 45, 20))
        .unwrap()
}

fn pinned(vendor: &str, product: &str, version: &str) -> LoggerBuilder {
    LoggerBuilder::new(vendor, product, version)
        .clock(test_time)
        .hostname_source(StaticHostname::new("testhost"))
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

/// Severity slot of an unescaped header
fn severity_of(line: &str) -> &str {
    let header = &line[line.find("CEF:").unwrap()..];
    header.split('|').nth(6).unwrap()
}

#[rstest]
#[case::simple(
    true,
    CefVersion::V1,
    "0.9.0",
    "1000",
    "testevent",
    "Nov 9 11:45:20 testhost CEF:1|cyberdyne|skynet|0.9.0|1000|testevent|Low|"
)]
#[case::omit_syslog_and_cef0(
    false,
    CefVersion::V0,
    "0.9.1",
    "1001",
    "testeventtofile",
    "CEF:0|cyberdyne|skynet|0.9.1|1001|testeventtofile|Low|"
)]
fn test_logger_log(
    #[case] syslog_header: bool,
    #[case] version: CefVersion,
    #[case] device_version: &str,
    #[case] class_id: &str,
    #[case] name: &str,
    #[case] want: &str,
) {
    let mut logger = pinned("cyberdyne", "skynet", device_version)
        .syslog_header(syslog_header)
        .cef_version(version)
        .build(Vec::new());

    logger.log(class_id, name, "Low", &Extensions::default()).unwrap();

    assert_eq!(String::from_utf8(logger.into_inner()).unwrap(), want);
}

#[test]
fn test_logger_log_error() {
    let mut logger = pinned("not", "relevant", "1")
        .omit_syslog_header()
        .build(ErrorWriter);

    let err = logger
        .log("9001", "scanner", Severity::VeryHigh.as_str(), &Extensions::default())
        .unwrap_err();

    assert!(matches!(err, CefError::SinkWriteFailed(_)));
    assert_eq!(err.to_string(), "failed to write log: underlying writer error");
}

#[test]
fn test_hostname_failure_writes_nothing() {
    let mut logger = LoggerBuilder::new("v", "p", "1")
        .clock(test_time)
        .hostname_source(|| -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::Other, "lookup failed"))
        })
        .build(Vec::new());

    let err = logger.log_low("1", "n", &Extensions::default()).unwrap_err();

    assert_eq!(err.to_string(), "failed to get hostname: lookup failed");
    assert!(logger.get_ref().is_empty());
}

#[rstest]
#[case::basic("Grand Trunks Semaphore Company", "SoftwareClacks", "1.0.0", true, CefVersion::V1)]
#[case::with_omit_header("Daystrom Data Concepts", "datalore", "1.0.1", false, CefVersion::V1)]
#[case::with_cef_version("Black Mesa", "Cascade Resonator", "1.0.3", true, CefVersion::V0)]
fn test_builder(
    #[case] vendor: &str,
    #[case] product: &str,
    #[case] version: &str,
    #[case] syslog_header: bool,
    #[case] cef_version: CefVersion,
) {
    let mut builder = LoggerBuilder::new(vendor, product, version).cef_version(cef_version);
    if !syslog_header {
        builder = builder.omit_syslog_header();
    }
    let logger = builder.build(Vec::new());

    assert_eq!(logger.syslog_header(), syslog_header);
    assert_eq!(logger.cef_version(), cef_version);
    assert_eq!(logger.device_vendor(), vendor);
    assert_eq!(logger.device_product(), product);
    assert_eq!(logger.device_version(), version);
}

#[test]
fn test_new_defaults() {
    let logger = Logger::new(Vec::new(), "testVendor", "testProduct", "1.0");
    assert_eq!(logger.cef_version(), CefVersion::V1);
    assert!(logger.syslog_header());
}

#[test]
fn test_with_cef_version_error() {
    let err = CefVersion::try_from(100).unwrap_err();
    assert!(matches!(err, CefError::InvalidCefVersion(100)));
}

#[rstest]
#[case::unknown(Severity::Unknown)]
#[case::low(Severity::Low)]
#[case::medium(Severity::Medium)]
#[case::high(Severity::High)]
#[case::very_high(Severity::VeryHigh)]
fn test_severity_wrappers(#[case] severity: Severity) {
    let mut logger = pinned("testVendor", "testProduct", "1.0").build(Vec::new());
    let ext = Extensions::default();

    match severity {
        Severity::Unknown => logger.log_unknown("tevt1", "test event 1", &ext),
        Severity::Low => logger.log_low("tevt1", "test event 1", &ext),
        Severity::Medium => logger.log_medium("tevt1", "test event 1", &ext),
        Severity::High => logger.log_high("tevt1", "test event 1", &ext),
        Severity::VeryHigh => logger.log_very_high("tevt1", "test event 1", &ext),
    }
    .unwrap();

    let line = String::from_utf8(logger.into_inner()).unwrap();
    assert_eq!(severity_of(&line), severity.as_str());
}

#[test]
fn test_full_line_with_extensions() {
    let mut logger = pinned("cyberdyne", "skynet", "0.9.0").build(Vec::new());
    let ext = Extensions {
        device_action: "blocked".to_string(),
        destination_port: Some(22),
        source_user_name: "john=connor".to_string(),
        ..Default::default()
    };

    logger.log_high("4625", "ssh|brute force", &ext).unwrap();

    assert_eq!(
        String::from_utf8(logger.into_inner()).unwrap(),
        "Nov 9 11:45:20 testhost CEF:1|cyberdyne|skynet|0.9.0|4625|ssh\\|brute force|High|act=blocked dpt=22 suser=john\\=connor"
    );
}

#[test]
fn test_no_trailing_newline() {
    let mut logger = pinned("v", "p", "1").omit_syslog_header().build(Vec::new());
    logger.log_low("1", "a", &Extensions::default()).unwrap();
    logger.log_low("2", "b", &Extensions::default()).unwrap();
    assert_eq!(
        String::from_utf8(logger.into_inner()).unwrap(),
        "CEF:1|v|p|1|1|a|Low|CEF:1|v|p|1|2|b|Low|"
    );
}
