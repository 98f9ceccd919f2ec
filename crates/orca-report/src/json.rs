//! JSON codec for the load report.
//!
//! Deserialization is strict but not picky about spelling: each key is
//! matched case-insensitively against both the schema name
//! (`cpu_utilization`) and its lowerCamelCase JSON form (`cpuUtilization`).
//! Unknown fields and repeated fields are errors, and metric values must be
//! JSON numbers. Serialization emits lowerCamelCase names and omits empty
//! maps.

use crate::OrcaLoadReport;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Schema field names accepted by the deserializer, in wire order.
const FIELDS: &[&str] = &[
    "cpu_utilization",
    "mem_utilization",
    "rps",
    "request_cost",
    "utilization",
    "rps_fractional",
    "eps",
    "named_metrics",
    "application_utilization",
];

enum Field {
    CpuUtilization,
    MemUtilization,
    Rps,
    RequestCost,
    Utilization,
    RpsFractional,
    Eps,
    NamedMetrics,
    ApplicationUtilization,
}

impl Field {
    /// Match a key against the schema name or its camelCase form, ignoring
    /// case.
    fn classify(key: &str) -> Option<Field> {
        match key.to_ascii_lowercase().as_str() {
            "cpu_utilization" | "cpuutilization" => Some(Field::CpuUtilization),
            "mem_utilization" | "memutilization" => Some(Field::MemUtilization),
            "rps" => Some(Field::Rps),
            "request_cost" | "requestcost" => Some(Field::RequestCost),
            "utilization" => Some(Field::Utilization),
            "rps_fractional" | "rpsfractional" => Some(Field::RpsFractional),
            "eps" => Some(Field::Eps),
            "named_metrics" | "namedmetrics" => Some(Field::NamedMetrics),
            "application_utilization" | "applicationutilization" => {
                Some(Field::ApplicationUtilization)
            }
            _ => None,
        }
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = OrcaLoadReport;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an ORCA load report object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut cpu_utilization: Option<f64> = None;
        let mut mem_utilization: Option<f64> = None;
        let mut rps: Option<u64> = None;
        let mut request_cost: Option<HashMap<String, f64>> = None;
        let mut utilization: Option<HashMap<String, f64>> = None;
        let mut rps_fractional: Option<f64> = None;
        let mut eps: Option<f64> = None;
        let mut named_metrics: Option<HashMap<String, f64>> = None;
        let mut application_utilization: Option<f64> = None;

        while let Some(key) = map.next_key::<String>()? {
            let field =
                Field::classify(&key).ok_or_else(|| de::Error::unknown_field(&key, FIELDS))?;
            let duplicate = match field {
                Field::CpuUtilization => cpu_utilization.replace(map.next_value()?).is_some(),
                Field::MemUtilization => mem_utilization.replace(map.next_value()?).is_some(),
                Field::Rps => rps.replace(map.next_value()?).is_some(),
                Field::RequestCost => request_cost.replace(map.next_value()?).is_some(),
                Field::Utilization => utilization.replace(map.next_value()?).is_some(),
                Field::RpsFractional => rps_fractional.replace(map.next_value()?).is_some(),
                Field::Eps => eps.replace(map.next_value()?).is_some(),
                Field::NamedMetrics => named_metrics.replace(map.next_value()?).is_some(),
                Field::ApplicationUtilization => {
                    application_utilization.replace(map.next_value()?).is_some()
                }
            };
            if duplicate {
                return Err(de::Error::custom(format!("duplicate field `{key}`")));
            }
        }

        Ok(OrcaLoadReport {
            cpu_utilization: cpu_utilization.unwrap_or_default(),
            mem_utilization: mem_utilization.unwrap_or_default(),
            rps: rps.unwrap_or_default(),
            request_cost: request_cost.unwrap_or_default(),
            utilization: utilization.unwrap_or_default(),
            rps_fractional: rps_fractional.unwrap_or_default(),
            eps: eps.unwrap_or_default(),
            named_metrics: named_metrics.unwrap_or_default(),
            application_utilization: application_utilization.unwrap_or_default(),
        })
    }
}

impl<'de> Deserialize<'de> for OrcaLoadReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("OrcaLoadReport", FIELDS, ReportVisitor)
    }
}

impl OrcaLoadReport {
    /// Parse a report from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a report from raw JSON bytes.
    pub fn from_json_slice(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    /// Render the report as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_snake_case_fields() {
        let report = OrcaLoadReport::from_json_str(
            r#"{"cpu_utilization": 0.7, "application_utilization": 0.8, "mem_utilization": 0.9,
                "eps": 2, "rps_fractional": 1000, "named_metrics": {"foo": 123, "bar": 0.2}}"#,
        )
        .unwrap();

        let expected = OrcaLoadReport::new()
            .with_cpu_utilization(0.7)
            .with_application_utilization(0.8)
            .with_mem_utilization(0.9)
            .with_eps(2.0)
            .with_rps_fractional(1000.0)
            .with_named_metric("foo", 123.0)
            .with_named_metric("bar", 0.2);
        assert_eq!(report, expected);
    }

    #[test]
    fn test_parses_camel_case_fields() {
        let report = OrcaLoadReport::from_json_str(
            r#"{"cpuUtilization": 0.4, "rpsFractional": 2.5, "namedMetrics": {"q": 1}}"#,
        )
        .unwrap();
        assert_eq!(report.cpu_utilization, 0.4);
        assert_eq!(report.rps_fractional, 2.5);
        assert_eq!(report.named_metrics["q"], 1.0);
    }

    #[test]
    fn test_field_matching_ignores_case() {
        let report = OrcaLoadReport::from_json_str(
            r#"{"CPU_UTILIZATION": 0.4, "MemUtilization": 0.5, "EPS": 1.5}"#,
        )
        .unwrap();
        assert_eq!(report.cpu_utilization, 0.4);
        assert_eq!(report.mem_utilization, 0.5);
        assert_eq!(report.eps, 1.5);
    }

    #[test]
    fn test_parses_maps_and_rps() {
        let report = OrcaLoadReport::from_json_str(
            r#"{"rps": 100, "requestCost": {"db": 44}, "utilization": {"gpu": 0.3}}"#,
        )
        .unwrap();
        assert_eq!(report.rps, 100);
        assert_eq!(report.request_cost["db"], 44.0);
        assert_eq!(report.utilization["gpu"], 0.3);
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = OrcaLoadReport::from_json_str(r#"{"cpu_load": 0.7}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_rejects_duplicate_field() {
        let err = OrcaLoadReport::from_json_str(r#"{"eps": 1, "eps": 2}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `eps`"));
    }

    #[test]
    fn test_rejects_duplicate_across_spellings() {
        let err = OrcaLoadReport::from_json_str(r#"{"cpu_utilization": 1, "cpuUtilization": 2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate field"));
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        assert!(OrcaLoadReport::from_json_str(r#"{"cpu_utilization": "0.7"}"#).is_err());
        assert!(OrcaLoadReport::from_json_str(r#"{"eps": null}"#).is_err());
    }

    #[test]
    fn test_rejects_non_object_input() {
        assert!(OrcaLoadReport::from_json_str("[1, 2]").is_err());
        assert!(OrcaLoadReport::from_json_str("0.7").is_err());
    }

    #[test]
    fn test_serializes_camel_case_without_empty_maps() {
        let json = OrcaLoadReport::new().with_cpu_utilization(0.5).to_json().unwrap();
        assert!(json.contains("\"cpuUtilization\":0.5"));
        assert!(!json.contains("namedMetrics"));
        assert!(!json.contains("requestCost"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = OrcaLoadReport::new()
            .with_cpu_utilization(0.7)
            .with_eps(2.0)
            .with_request_cost("db", 44.0)
            .with_named_metric("foo", 123.0);
        let json = report.to_json().unwrap();
        assert_eq!(OrcaLoadReport::from_json_str(&json).unwrap(), report);
    }
}
