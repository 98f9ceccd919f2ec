//! orca - inspect and craft ORCA load report header values

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand, ValueEnum};
use http::{HeaderMap, HeaderValue};
use orca_parser::{
    parse_load_report, ENDPOINT_LOAD_METRICS_BIN_HEADER, ENDPOINT_LOAD_METRICS_HEADER,
    ENDPOINT_LOAD_METRICS_JSON_HEADER,
};
use orca_report::OrcaLoadReport;
use tracing::debug;

mod output;

use output::OutputFormat;

/// Inspect and craft ORCA load report header values
#[derive(Debug, Parser)]
#[command(name = "orca")]
#[command(about = "Inspect and craft ORCA load report header values")]
#[command(version)]
pub struct Cli {
    /// Output format for decoded reports
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode ORCA header values into a normalized load report
    Decode {
        /// Value of the x-endpoint-load-metrics header; repeat the flag
        /// for repeated header instances
        #[arg(long, value_name = "VALUE")]
        native: Vec<String>,

        /// Value of the x-endpoint-load-metrics-json header
        #[arg(long, value_name = "JSON")]
        json: Option<String>,

        /// Value of the x-endpoint-load-metrics-bin header (base64)
        #[arg(long, value_name = "BASE64")]
        binary: Option<String>,
    },

    /// Produce a header value carrying the given metrics
    Encode {
        /// CPU utilization, as a fraction of available CPU
        #[arg(long, value_name = "FLOAT")]
        cpu: Option<f64>,

        /// Memory utilization, as a fraction of available memory
        #[arg(long, value_name = "FLOAT")]
        mem: Option<f64>,

        /// Application utilization
        #[arg(long, value_name = "FLOAT")]
        application: Option<f64>,

        /// Errors per second
        #[arg(long, value_name = "FLOAT")]
        eps: Option<f64>,

        /// Requests per second (fractional)
        #[arg(long, value_name = "FLOAT")]
        rps: Option<f64>,

        /// Named metric as KEY=VALUE; repeatable
        #[arg(long = "named", value_name = "KEY=VALUE")]
        named: Vec<String>,

        /// Header encoding to produce
        #[arg(short, long, value_enum, default_value = "native")]
        format: EncodeFormat,
    },
}

/// Wire encodings the `encode` subcommand can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EncodeFormat {
    /// Comma-separated name:value text
    Native,
    /// JSON object
    Json,
    /// Base64-encoded protobuf
    Binary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("orca_cli={},orca_parser={}", log_level, log_level))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Decode { native, json, binary } => decode(native, json, binary, cli.output),
        Commands::Encode {
            cpu,
            mem,
            application,
            eps,
            rps,
            named,
            format,
        } => encode(cpu, mem, application, eps, rps, named, format),
    }
}

fn decode(
    native: Vec<String>,
    json: Option<String>,
    binary: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let mut headers = HeaderMap::new();
    for value in &native {
        headers.append(ENDPOINT_LOAD_METRICS_HEADER, header_value(value)?);
    }
    if let Some(value) = &json {
        headers.append(ENDPOINT_LOAD_METRICS_JSON_HEADER, header_value(value)?);
    }
    if let Some(value) = &binary {
        headers.append(ENDPOINT_LOAD_METRICS_BIN_HEADER, header_value(value)?);
    }

    debug!(headers = headers.len(), "decoding ORCA header values");
    match parse_load_report(&headers) {
        Ok(report) => {
            println!("{}", output.render(&report)?);
            Ok(())
        }
        Err(e) => bail!("{} ({})", e, e.kind()),
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .with_context(|| format!("value is not a legal header value: {value:?}"))
}

fn encode(
    cpu: Option<f64>,
    mem: Option<f64>,
    application: Option<f64>,
    eps: Option<f64>,
    rps: Option<f64>,
    named: Vec<String>,
    format: EncodeFormat,
) -> Result<()> {
    let mut report = OrcaLoadReport::new();
    if let Some(v) = cpu {
        report = report.with_cpu_utilization(v);
    }
    if let Some(v) = mem {
        report = report.with_mem_utilization(v);
    }
    if let Some(v) = application {
        report = report.with_application_utilization(v);
    }
    if let Some(v) = eps {
        report = report.with_eps(v);
    }
    if let Some(v) = rps {
        report = report.with_rps_fractional(v);
    }
    for entry in &named {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("named metric must be KEY=VALUE: {entry:?}"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("named metric value must be a number: {entry:?}"))?;
        report = report.with_named_metric(key, value);
    }
    if report.is_empty() {
        bail!("no metrics given to encode");
    }

    let (header, value) = match format {
        EncodeFormat::Native => (ENDPOINT_LOAD_METRICS_HEADER, native_header_value(&report)),
        EncodeFormat::Json => (ENDPOINT_LOAD_METRICS_JSON_HEADER, report.to_json()?),
        EncodeFormat::Binary => (
            ENDPOINT_LOAD_METRICS_BIN_HEADER,
            STANDARD.encode(report.to_bytes()),
        ),
    };
    println!("{header}: {value}");
    Ok(())
}

/// Render a report as native comma-separated `name:value` text.
fn native_header_value(report: &OrcaLoadReport) -> String {
    let mut parts = Vec::new();
    if report.cpu_utilization != 0.0 {
        parts.push(format!("cpu_utilization:{}", report.cpu_utilization));
    }
    if report.mem_utilization != 0.0 {
        parts.push(format!("mem_utilization:{}", report.mem_utilization));
    }
    if report.application_utilization != 0.0 {
        parts.push(format!(
            "application_utilization:{}",
            report.application_utilization
        ));
    }
    if report.eps != 0.0 {
        parts.push(format!("eps:{}", report.eps));
    }
    if report.rps_fractional != 0.0 {
        parts.push(format!("rps_fractional:{}", report.rps_fractional));
    }
    // HashMap iteration order is unstable; emit named metrics sorted.
    let mut named: Vec<_> = report.named_metrics.iter().collect();
    named.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in named {
        parts.push(format!("named_metrics.{key}:{value}"));
    }
    parts.join(",")
}
