//! ORCA header names and format selection.

use crate::error::{ParseError, Result};
use http::HeaderMap;
use std::fmt;

/// Native (comma-separated `name:value` text) load metrics header.
pub const ENDPOINT_LOAD_METRICS_HEADER: &str = "x-endpoint-load-metrics";

/// Base64-encoded binary (protobuf) load metrics header.
pub const ENDPOINT_LOAD_METRICS_BIN_HEADER: &str = "x-endpoint-load-metrics-bin";

/// JSON-encoded load metrics header.
pub const ENDPOINT_LOAD_METRICS_JSON_HEADER: &str = "x-endpoint-load-metrics-json";

/// The wire encoding a response chose for its load report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Plain-text `name:value` list in `x-endpoint-load-metrics`.
    Native,
    /// Base64-encoded protobuf in `x-endpoint-load-metrics-bin`.
    Binary,
    /// JSON object in `x-endpoint-load-metrics-json`.
    Json,
}

impl HeaderFormat {
    /// All formats, in the order the selector probes them.
    pub const ALL: [HeaderFormat; 3] = [
        HeaderFormat::Native,
        HeaderFormat::Binary,
        HeaderFormat::Json,
    ];

    /// The header name that carries this format.
    pub const fn header_name(&self) -> &'static str {
        match self {
            HeaderFormat::Native => ENDPOINT_LOAD_METRICS_HEADER,
            HeaderFormat::Binary => ENDPOINT_LOAD_METRICS_BIN_HEADER,
            HeaderFormat::Json => ENDPOINT_LOAD_METRICS_JSON_HEADER,
        }
    }

    /// Pick the single ORCA header format present on a response.
    ///
    /// A header counts as present when at least one instance exists, even
    /// with an empty value. No header at all is
    /// [`ParseError::MissingHeader`]; two or more formats at once is
    /// [`ParseError::ConflictingHeaders`], regardless of their content.
    pub fn detect(headers: &HeaderMap) -> Result<HeaderFormat> {
        let mut found: Option<HeaderFormat> = None;
        for format in HeaderFormat::ALL {
            if headers.contains_key(format.header_name()) {
                if found.is_some() {
                    return Err(ParseError::ConflictingHeaders);
                }
                found = Some(format);
            }
        }
        found.ok_or(ParseError::MissingHeader)
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderFormat::Native => write!(f, "native"),
            HeaderFormat::Binary => write!(f, "binary"),
            HeaderFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HeaderName;
    use http::HeaderValue;

    #[test]
    fn test_detects_each_format_alone() {
        for format in HeaderFormat::ALL {
            let mut headers = HeaderMap::new();
            headers.insert(format.header_name(), HeaderValue::from_static("x"));
            assert_eq!(HeaderFormat::detect(&headers).unwrap(), format);
        }
    }

    #[test]
    fn test_empty_value_still_counts_as_present() {
        let mut headers = HeaderMap::new();
        headers.insert(ENDPOINT_LOAD_METRICS_BIN_HEADER, HeaderValue::from_static(""));
        assert_eq!(HeaderFormat::detect(&headers).unwrap(), HeaderFormat::Binary);
    }

    #[test]
    fn test_no_orca_header_is_missing() {
        assert_eq!(
            HeaderFormat::detect(&HeaderMap::new()).unwrap_err(),
            ParseError::MissingHeader
        );

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        assert_eq!(
            HeaderFormat::detect(&headers).unwrap_err(),
            ParseError::MissingHeader
        );
    }

    #[test]
    fn test_two_formats_conflict() {
        let mut headers = HeaderMap::new();
        headers.insert(
            ENDPOINT_LOAD_METRICS_HEADER,
            HeaderValue::from_static("cpu_utilization:0.5"),
        );
        headers.insert(ENDPOINT_LOAD_METRICS_JSON_HEADER, HeaderValue::from_static("{}"));
        assert_eq!(
            HeaderFormat::detect(&headers).unwrap_err(),
            ParseError::ConflictingHeaders
        );
    }

    #[test]
    fn test_all_three_formats_conflict() {
        let mut headers = HeaderMap::new();
        for format in HeaderFormat::ALL {
            headers.insert(format.header_name(), HeaderValue::from_static("x"));
        }
        assert_eq!(
            HeaderFormat::detect(&headers).unwrap_err(),
            ParseError::ConflictingHeaders
        );
    }

    #[test]
    fn test_header_names_match_case_insensitively() {
        let name: HeaderName = "X-Endpoint-Load-Metrics".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static("eps:1"));
        assert_eq!(HeaderFormat::detect(&headers).unwrap(), HeaderFormat::Native);
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(HeaderFormat::Native.to_string(), "native");
        assert_eq!(HeaderFormat::Binary.to_string(), "binary");
        assert_eq!(HeaderFormat::Json.to_string(), "json");
    }
}
