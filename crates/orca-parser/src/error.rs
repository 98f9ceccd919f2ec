//! Error types for ORCA header parsing.

use std::fmt;
use thiserror::Error;

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Classification of a parse failure, matching the status taxonomy that
/// load-balancing callers key their fallback behavior on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No recognized ORCA header was present on the response.
    NotFound,
    /// The response carried ORCA data that could not be decoded, or more
    /// than one header format at once.
    InvalidArgument,
    /// A metric key appeared more than once within a single report.
    AlreadyExists,
}

impl ErrorKind {
    /// Stable lowercase label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::AlreadyExists => "already_exists",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while extracting an ORCA load report from response
/// headers.
///
/// Every failure is terminal for the call: no partial report is returned
/// and no fallback between header formats is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// None of the ORCA headers were present.
    #[error("no ORCA data sent from the backend")]
    MissingHeader,

    /// Two or more ORCA headers were present at the same time.
    #[error("more than one ORCA header found")]
    ConflictingHeaders,

    /// A native-format token had an empty metric name.
    #[error("metric names cannot be empty strings")]
    EmptyMetricName,

    /// A native-format token had an empty metric value.
    #[error("metric values cannot be empty strings")]
    EmptyMetricValue,

    /// A native-format value did not parse as a floating-point number.
    #[error("unable to parse custom backend load metric value({name}): {value}")]
    InvalidMetricValue { name: String, value: String },

    /// A metric name appeared more than once within one report.
    #[error("{header} contains duplicate metric: {name}")]
    DuplicateMetric { header: &'static str, name: String },

    /// A `named_metrics.` token carried nothing after the prefix.
    #[error("named metric key is empty")]
    EmptyNamedMetricKey,

    /// A native-format name does not match any recognized field.
    #[error("unsupported metric name: {0}")]
    UnsupportedMetricName(String),

    /// A native header value was not valid UTF-8 and cannot be tokenized.
    #[error("{header} contains a non-UTF-8 value")]
    NonUtf8Header { header: &'static str },

    /// The JSON header failed strict schema decoding.
    #[error("invalid JSON load report: {0}")]
    InvalidJson(String),

    /// The binary header failed protobuf decoding. Carries the raw header
    /// text, before base64 decoding, for diagnostics.
    #[error("unable to parse binary header to OrcaLoadReport: {0}")]
    InvalidBinary(String),
}

impl ParseError {
    /// Map this error onto the status taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MissingHeader => ErrorKind::NotFound,
            ParseError::DuplicateMetric { .. } => ErrorKind::AlreadyExists,
            ParseError::ConflictingHeaders
            | ParseError::EmptyMetricName
            | ParseError::EmptyMetricValue
            | ParseError::InvalidMetricValue { .. }
            | ParseError::EmptyNamedMetricKey
            | ParseError::UnsupportedMetricName(_)
            | ParseError::NonUtf8Header { .. }
            | ParseError::InvalidJson(_)
            | ParseError::InvalidBinary(_) => ErrorKind::InvalidArgument,
        }
    }

    /// True when the response simply carried no ORCA data, as opposed to
    /// carrying data that failed to decode.
    pub fn is_missing(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
