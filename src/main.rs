use anyhow::{Context, Result};
use cefevent::{validate_severity, Event, LoggerConfig};
use clap::Parser;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "cefevent")]
#[command(about = "Encode JSON events from stdin as CEF lines on stdout", long_about = None)]
struct Cli {
    /// YAML logger configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device vendor in the CEF header
    #[arg(long)]
    vendor: Option<String>,

    /// Device product in the CEF header
    #[arg(long)]
    product: Option<String>,

    /// Device version in the CEF header
    #[arg(long)]
    device_version: Option<String>,

    /// CEF format version (0 or 1)
    #[arg(long)]
    cef_version: Option<u8>,

    /// Do not prefix lines with a syslog timestamp and hostname
    #[arg(long)]
    no_syslog_header: bool,

    /// Hostname to use instead of the system hostname
    #[arg(long)]
    hostname: Option<String>,

    /// Skip events whose severity is not a keyword or 0-10
    #[arg(long)]
    strict_severity: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit diagnostics as JSON, filtered by RUST_LOG
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn logger_config(&self) -> Result<LoggerConfig> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_yaml_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => LoggerConfig::new(
                self.vendor.clone().unwrap_or_default(),
                self.product.clone().unwrap_or_default(),
                self.device_version.clone().unwrap_or_default(),
            ),
        };
        config.apply_env_overrides()?;

        if let Some(vendor) = &self.vendor {
            config.device_vendor = vendor.clone();
        }
        if let Some(product) = &self.product {
            config.device_product = product.clone();
        }
        if let Some(version) = &self.device_version {
            config.device_version = version.clone();
        }
        if let Some(ver) = self.cef_version {
            config.cef_version = ver;
        }
        if self.no_syslog_header {
            config.syslog_header = false;
        }
        if let Some(hostname) = &self.hostname {
            config.hostname = Some(hostname.clone());
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.json_logs {
        cefevent::init_tracing();
    } else if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let config = cli.logger_config()?;
    let builder = config.builder().context("invalid logger configuration")?;

    let stdout = io::stdout();
    let mut logger = builder.build(BufWriter::new(stdout.lock()));

    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: Event = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping malformed event");
                continue;
            }
        };

        if cli.strict_severity {
            if let Err(e) = validate_severity(&event.severity) {
                warn!(line = index + 1, error = %e, "skipping event");
                continue;
            }
        }

        logger.log_event(&event)?;
        logger.get_mut().write_all(b"\n")?;
    }

    logger.get_mut().flush()?;
    Ok(())
}
