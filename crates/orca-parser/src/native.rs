//! Native-format header decoding.
//!
//! The native encoding is a comma-separated list of `name:value` tokens,
//! optionally spread across repeated `x-endpoint-load-metrics` header
//! instances. Instances are merged in order into one report, names are
//! matched literally, and the first invalid token aborts the decode.

use crate::error::{ParseError, Result};
use crate::headers::ENDPOINT_LOAD_METRICS_HEADER;
use http::HeaderValue;
use orca_report::OrcaLoadReport;
use std::collections::hash_map::Entry;
use std::collections::HashSet;

/// Token prefix that routes a metric into the named-metrics map.
const NAMED_METRICS_PREFIX: &str = "named_metrics.";

/// Decode the ordered native header values into a fresh report.
pub(crate) fn decode<'a, I>(values: I) -> Result<OrcaLoadReport>
where
    I: IntoIterator<Item = &'a HeaderValue>,
{
    let mut report = OrcaLoadReport::default();
    // Literal token names seen so far, across all header instances.
    let mut seen: HashSet<String> = HashSet::new();

    for raw in values {
        let text = std::str::from_utf8(raw.as_bytes()).map_err(|_| ParseError::NonUtf8Header {
            header: ENDPOINT_LOAD_METRICS_HEADER,
        })?;
        for token in text.split(',') {
            let token = token.trim();
            // Split at the first colon; later colons belong to the value.
            let (name, value) = match token.split_once(':') {
                Some((name, value)) => (name.trim(), value.trim()),
                None => (token, ""),
            };
            if name.is_empty() {
                return Err(ParseError::EmptyMetricName);
            }
            if value.is_empty() {
                return Err(ParseError::EmptyMetricValue);
            }
            let parsed = parse_metric_value(name, value)?;
            if !seen.insert(name.to_string()) {
                return Err(ParseError::DuplicateMetric {
                    header: ENDPOINT_LOAD_METRICS_HEADER,
                    name: name.to_string(),
                });
            }
            write_metric(&mut report, name, parsed)?;
        }
    }

    Ok(report)
}

/// Strictly parse one metric value as a 64-bit float.
fn parse_metric_value(name: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidMetricValue {
            name: name.to_string(),
            value: value.to_string(),
        })
}

/// Write one validated metric into the report.
///
/// Names carrying the `named_metrics.` prefix go into the named-metrics
/// map with an insert-or-fail; any other name must match one of the
/// scalar fields settable through the native format.
fn write_metric(report: &mut OrcaLoadReport, name: &str, value: f64) -> Result<()> {
    if let Some(key) = name.strip_prefix(NAMED_METRICS_PREFIX) {
        if key.is_empty() {
            return Err(ParseError::EmptyNamedMetricKey);
        }
        return match report.named_metrics.entry(key.to_string()) {
            Entry::Occupied(_) => Err(ParseError::DuplicateMetric {
                header: ENDPOINT_LOAD_METRICS_HEADER,
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        };
    }

    match name {
        "cpu_utilization" => report.cpu_utilization = value,
        "mem_utilization" => report.mem_utilization = value,
        "application_utilization" => report.application_utilization = value,
        "eps" => report.eps = value,
        "rps_fractional" => report.rps_fractional = value,
        _ => return Err(ParseError::UnsupportedMetricName(name.to_string())),
    }
    Ok(())
}
