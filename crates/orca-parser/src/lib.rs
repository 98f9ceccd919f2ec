//! # orca-parser
//!
//! Extraction of ORCA (Open Request Cost Aggregation) load reports from
//! HTTP response headers.
//!
//! Backends publish per-response load and cost signals in exactly one of
//! three header encodings. The parser disambiguates the encoding, strictly
//! decodes it, and returns the canonical [`OrcaLoadReport`] that
//! load-balancing logic consumes:
//!
//! - `x-endpoint-load-metrics`: native comma-separated `name:value` text
//! - `x-endpoint-load-metrics-bin`: base64-encoded protobuf
//! - `x-endpoint-load-metrics-json`: JSON object
//!
//! Parsing is fail-fast. A response either yields a complete report or a
//! [`ParseError`] whose [`ErrorKind`] tells the caller whether data was
//! absent, malformed, or self-contradictory.
//!
//! ## Example
//!
//! ```
//! use http::{HeaderMap, HeaderValue};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     orca_parser::ENDPOINT_LOAD_METRICS_HEADER,
//!     HeaderValue::from_static("cpu_utilization:0.7,named_metrics.queue:42"),
//! );
//!
//! let report = orca_parser::parse_load_report(&headers).unwrap();
//! assert_eq!(report.cpu_utilization, 0.7);
//! assert_eq!(report.named_metrics["queue"], 42.0);
//! ```

pub mod error;
pub mod headers;
mod native;
mod parser;

pub use error::{ErrorKind, ParseError, Result};
pub use headers::{
    HeaderFormat, ENDPOINT_LOAD_METRICS_BIN_HEADER, ENDPOINT_LOAD_METRICS_HEADER,
    ENDPOINT_LOAD_METRICS_JSON_HEADER,
};
pub use parser::parse_load_report;

/// The canonical report type, re-exported for callers that do not depend
/// on the schema crate directly.
pub use orca_report::OrcaLoadReport;
