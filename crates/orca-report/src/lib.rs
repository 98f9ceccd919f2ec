//! # orca-report
//!
//! Canonical ORCA (Open Request Cost Aggregation) load report schema and
//! codecs.
//!
//! Backends attach per-response load and cost signals to their replies so
//! that clients can make utilization-aware balancing decisions. This crate
//! owns the normalized form of that signal:
//!
//! - [`OrcaLoadReport`], wire-compatible with `xds.data.orca.v3.OrcaLoadReport`
//! - the protobuf binary codec ([`OrcaLoadReport::to_bytes`] /
//!   [`OrcaLoadReport::from_bytes`])
//! - a strict JSON codec with case-insensitive field names (see [`json`])
//!
//! Header-level concerns (which header carries which encoding, base64,
//! token grammar) live in the `orca-parser` crate.

pub mod json;
pub mod report;

pub use report::OrcaLoadReport;
