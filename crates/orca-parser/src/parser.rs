//! Entry point tying header selection to the per-format decoders.

use crate::error::{ParseError, Result};
use crate::headers::{
    HeaderFormat, ENDPOINT_LOAD_METRICS_BIN_HEADER, ENDPOINT_LOAD_METRICS_HEADER,
    ENDPOINT_LOAD_METRICS_JSON_HEADER,
};
use crate::native;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::{HeaderMap, HeaderValue};
use orca_report::OrcaLoadReport;
use tracing::debug;

/// Extract the ORCA load report carried by a response's headers.
///
/// Exactly one of the three ORCA headers must be present; its payload is
/// decoded into a canonical [`OrcaLoadReport`]. The call is synchronous
/// and stateless: the report is built fresh each time and is either fully
/// populated or discarded on the first error.
///
/// # Errors
///
/// - [`ParseError::MissingHeader`] when no ORCA header is present.
/// - [`ParseError::ConflictingHeaders`] when more than one is present.
/// - Any decoder error for the single present format, unchanged.
///
/// # Examples
///
/// ```
/// use http::{HeaderMap, HeaderValue};
/// use orca_parser::{parse_load_report, ENDPOINT_LOAD_METRICS_HEADER};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     ENDPOINT_LOAD_METRICS_HEADER,
///     HeaderValue::from_static("cpu_utilization:0.5,eps:2"),
/// );
/// let report = parse_load_report(&headers).unwrap();
/// assert_eq!(report.cpu_utilization, 0.5);
/// assert_eq!(report.eps, 2.0);
/// ```
pub fn parse_load_report(headers: &HeaderMap) -> Result<OrcaLoadReport> {
    let format = HeaderFormat::detect(headers)?;
    debug!(format = %format, "decoding ORCA load report header");

    match format {
        HeaderFormat::Native => native::decode(headers.get_all(ENDPOINT_LOAD_METRICS_HEADER)),
        HeaderFormat::Json => {
            // Only the first instance is read when the header repeats.
            let value = headers
                .get(ENDPOINT_LOAD_METRICS_JSON_HEADER)
                .ok_or(ParseError::MissingHeader)?;
            decode_json_header(value)
        }
        HeaderFormat::Binary => {
            let value = headers
                .get(ENDPOINT_LOAD_METRICS_BIN_HEADER)
                .ok_or(ParseError::MissingHeader)?;
            decode_binary_header(value)
        }
    }
}

/// Decode the JSON header value through the strict schema codec.
fn decode_json_header(value: &HeaderValue) -> Result<OrcaLoadReport> {
    OrcaLoadReport::from_json_slice(value.as_bytes())
        .map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Decode the binary header value: base64 first, then protobuf.
///
/// A value that fails base64 decoding is treated as an empty byte
/// sequence rather than an error of its own; whether the report then
/// decodes is up to the protobuf codec alone.
fn decode_binary_header(value: &HeaderValue) -> Result<OrcaLoadReport> {
    let bytes = STANDARD.decode(value.as_bytes()).unwrap_or_default();
    OrcaLoadReport::from_bytes(&bytes).map_err(|_| {
        ParseError::InvalidBinary(String::from_utf8_lossy(value.as_bytes()).into_owned())
    })
}
