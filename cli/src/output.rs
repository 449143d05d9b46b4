//! Output formatting for records, sheets, and parse reports.

use netscrape_core::NeighborRecord;
use netscrape_parser::report::{ParseReport, ReportBundle};
use netscrape_summary::SheetTable;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Column headers of the combined neighbor view.
pub const CONNECTION_COLUMNS: [&str; 7] = [
    "Source Switch",
    "Device ID",
    "Local Interface",
    "Holdtime",
    "Capability",
    "Platform",
    "Port ID",
];

/// Serializes `value` as pretty JSON or YAML.
pub fn to_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        _ => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}")),
    }
}

/// Builds the `All_Connections` sheet from neighbor records.
pub fn connections_sheet(records: &[NeighborRecord]) -> SheetTable {
    let mut sheet = SheetTable::new("All_Connections", &CONNECTION_COLUMNS);
    sheet.rows = records
        .iter()
        .map(|r| {
            [
                &r.source_device,
                &r.device_id,
                &r.local_interface,
                &r.holdtime,
                &r.capability,
                &r.platform,
                &r.port_id,
            ]
            .into_iter()
            .map(|value| Some(value.clone()))
            .collect()
        })
        .collect();
    sheet
}

/// Formats sheets in the requested output format.
pub fn format_sheets(sheets: &[SheetTable], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => to_structured(&sheets, format),
        OutputFormat::Markdown => Ok(sheets.iter().map(sheet_to_markdown).collect()),
        OutputFormat::Table => Ok(sheets
            .iter()
            .map(sheet_to_table)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Formats a report bundle in the requested output format.
pub fn format_report_bundle(bundle: &ReportBundle, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json | OutputFormat::Yaml => to_structured(bundle, format),
        OutputFormat::Markdown => {
            let mut out = String::from("## Parse Reports\n\n");
            out.push_str("| Device | Table | Records | Skipped | Status |\n");
            out.push_str("|--------|-------|---------|---------|--------|\n");
            for report in &bundle.reports {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    report.device,
                    report.table,
                    report.records,
                    report.skipped_lines,
                    report.status_message()
                ));
            }
            out.push_str(&format!("\n{}\n\n", bundle_totals(bundle)));
            Ok(out)
        }
        OutputFormat::Table => {
            let mut out: String = bundle.reports.iter().map(report_to_table).collect();
            out.push_str(&bundle_totals(bundle));
            out.push('\n');
            Ok(out)
        }
    }
}

fn bundle_totals(bundle: &ReportBundle) -> String {
    let mut line = format!("Total records: {}", bundle.total_records());
    let failures: Vec<String> = bundle
        .failure_code_summary()
        .iter()
        .map(|(code, count)| format!("{code}={count}"))
        .collect();
    if !failures.is_empty() {
        line.push_str(&format!(", failures: {}", failures.join(" ")));
    }
    line
}

fn report_to_table(report: &ParseReport) -> String {
    let mut out = format!(
        "{:<20} {:<16} records={:<5} skipped={}",
        report.device,
        report.table.to_string(),
        report.records,
        report.skipped_lines
    );
    if let Some(ref code) = report.failure_code {
        out.push_str(&format!("  [{code}]"));
    }
    out.push('\n');
    out
}

fn cell_text(cell: &Option<String>) -> &str {
    cell.as_deref().unwrap_or("")
}

fn sheet_to_markdown(sheet: &SheetTable) -> String {
    let mut out = format!("## {}\n\n", sheet.name);
    out.push_str(&format!("| {} |\n", sheet.columns.join(" | ")));
    out.push_str(&format!(
        "|{}|\n",
        sheet
            .columns
            .iter()
            .map(|c| "-".repeat(c.len() + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in &sheet.rows {
        let cells: Vec<&str> = (0..sheet.columns.len())
            .map(|idx| row.get(idx).map_or("", cell_text))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out.push('\n');
    out
}

fn sheet_to_table(sheet: &SheetTable) -> String {
    let widths: Vec<usize> = sheet
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            sheet
                .rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell_text(cell).chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("{}\n", sheet.name);
    out.push_str(&render(sheet.columns.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in &sheet.rows {
        let cells = (0..sheet.columns.len())
            .map(|idx| row.get(idx).map_or("", cell_text))
            .collect();
        out.push_str(&render(cells));
        out.push('\n');
    }
    out
}
