//! The canonical load report message.

use prost::Message;
use serde::Serialize;
use std::collections::HashMap;

/// A load report published by a backend alongside one of its responses.
///
/// Field numbers match the `xds.data.orca.v3.OrcaLoadReport` wire format,
/// so binary reports produced by existing backends decode without any
/// translation step. Utilization fields are fractions of available
/// resources and may exceed 1.0 when a backend runs past its soft limits.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrcaLoadReport {
    /// CPU utilization.
    #[prost(double, tag = "1")]
    pub cpu_utilization: f64,
    /// Memory utilization.
    #[prost(double, tag = "2")]
    pub mem_utilization: f64,
    /// Total requests per second. Superseded on the wire by
    /// `rps_fractional`; kept so older binary reports round-trip.
    #[prost(uint64, tag = "3")]
    pub rps: u64,
    /// Application-specific absolute costs, keyed by cost name.
    #[prost(map = "string, double", tag = "4")]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub request_cost: HashMap<String, f64>,
    /// Resource utilization values, keyed by resource name.
    #[prost(map = "string, double", tag = "5")]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub utilization: HashMap<String, f64>,
    /// Total requests per second, fractional.
    #[prost(double, tag = "6")]
    pub rps_fractional: f64,
    /// Total errors per second.
    #[prost(double, tag = "7")]
    pub eps: f64,
    /// Opaque application-specific metrics, keyed by caller-defined names.
    #[prost(map = "string, double", tag = "8")]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub named_metrics: HashMap<String, f64>,
    /// Application-specific utilization, e.g. the binding resource for a
    /// workload constrained by more than one.
    #[prost(double, tag = "9")]
    pub application_utilization: f64,
}

impl OrcaLoadReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CPU utilization.
    pub fn with_cpu_utilization(mut self, value: f64) -> Self {
        self.cpu_utilization = value;
        self
    }

    /// Set the memory utilization.
    pub fn with_mem_utilization(mut self, value: f64) -> Self {
        self.mem_utilization = value;
        self
    }

    /// Set the application utilization.
    pub fn with_application_utilization(mut self, value: f64) -> Self {
        self.application_utilization = value;
        self
    }

    /// Set the errors-per-second rate.
    pub fn with_eps(mut self, value: f64) -> Self {
        self.eps = value;
        self
    }

    /// Set the fractional requests-per-second rate.
    pub fn with_rps_fractional(mut self, value: f64) -> Self {
        self.rps_fractional = value;
        self
    }

    /// Add one request cost entry.
    pub fn with_request_cost(mut self, name: impl Into<String>, value: f64) -> Self {
        self.request_cost.insert(name.into(), value);
        self
    }

    /// Add one resource utilization entry.
    pub fn with_utilization(mut self, name: impl Into<String>, value: f64) -> Self {
        self.utilization.insert(name.into(), value);
        self
    }

    /// Add one named metric entry.
    pub fn with_named_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.named_metrics.insert(name.into(), value);
        self
    }

    /// True when every field holds its default value. This is also what an
    /// empty byte sequence decodes to.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize to the protobuf wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Decode from the protobuf wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(bytes)
    }
}
