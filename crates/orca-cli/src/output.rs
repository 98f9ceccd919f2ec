//! Output formatting for decoded load reports

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use orca_report::OrcaLoadReport;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Render a report in this format.
    pub fn render(&self, report: &OrcaLoadReport) -> Result<String> {
        match self {
            OutputFormat::Table => Ok(render_table(report)),
            OutputFormat::Json => Ok(report.to_json_pretty()?),
        }
    }
}

fn render_table(report: &OrcaLoadReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = ["Metric", "Value"]
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    table.add_row(vec![
        "cpu_utilization".to_string(),
        report.cpu_utilization.to_string(),
    ]);
    table.add_row(vec![
        "mem_utilization".to_string(),
        report.mem_utilization.to_string(),
    ]);
    table.add_row(vec![
        "application_utilization".to_string(),
        report.application_utilization.to_string(),
    ]);
    table.add_row(vec!["eps".to_string(), report.eps.to_string()]);
    table.add_row(vec![
        "rps_fractional".to_string(),
        report.rps_fractional.to_string(),
    ]);

    for (label, map) in [
        ("request_cost", &report.request_cost),
        ("utilization", &report.utilization),
        ("named_metrics", &report.named_metrics),
    ] {
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            table.add_row(vec![format!("{label}.{key}"), value.to_string()]);
        }
    }

    table.to_string()
}
