//! Structured per-device parse reporting.

use serde::{Deserialize, Serialize};

/// Which CLI table a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// `show cdp neighbors` style listing.
    Neighbors,
    /// `show interface status` table.
    InterfaceStatus,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neighbors => write!(f, "neighbors"),
            Self::InterfaceStatus => write!(f, "interface_status"),
        }
    }
}

/// Structured failure code for a parse that produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    /// No recognizable header line in the capture.
    HeaderNotFound,
    /// A header was found but no data row followed it.
    NoRecords,
    /// The capture itself could not be read.
    ReadFailed,
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeaderNotFound => write!(f, "header_not_found"),
            Self::NoRecords => write!(f, "no_records"),
            Self::ReadFailed => write!(f, "read_failed"),
        }
    }
}

/// Outcome of parsing one device's capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    pub device: String,
    pub table: TableKind,
    pub header_found: bool,
    /// Zero-based index of the header line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_line: Option<usize>,
    pub records: usize,
    /// Data lines dropped as malformed.
    pub skipped_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<FailureCode>,
    pub warnings: Vec<String>,
}

impl ParseReport {
    /// Builds a report, deriving the failure code from the counts.
    pub fn new(
        device: &str,
        table: TableKind,
        header_line: Option<usize>,
        records: usize,
        skipped_lines: usize,
        warnings: Vec<String>,
    ) -> Self {
        let failure_code = match (header_line, records) {
            (None, _) => Some(FailureCode::HeaderNotFound),
            (Some(_), 0) => Some(FailureCode::NoRecords),
            _ => None,
        };
        Self {
            device: device.to_string(),
            table,
            header_found: header_line.is_some(),
            header_line,
            records,
            skipped_lines,
            failure_code,
            warnings,
        }
    }

    /// Report for a device whose capture could not be read; `error` is kept
    /// as its only warning.
    pub fn read_failed(device: &str, table: TableKind, error: &str) -> Self {
        Self {
            device: device.to_string(),
            table,
            header_found: false,
            header_line: None,
            records: 0,
            skipped_lines: 0,
            failure_code: Some(FailureCode::ReadFailed),
            warnings: vec![error.to_string()],
        }
    }

    /// Operator-facing status line for this device.
    pub fn status_message(&self) -> String {
        if self.failure_code == Some(FailureCode::ReadFailed) {
            return "Capture could not be read".to_string();
        }
        if self.records > 0 {
            return format!("{} records parsed", self.records);
        }
        match self.table {
            TableKind::Neighbors => "No CDP neighbors found".to_string(),
            TableKind::InterfaceStatus => "No data parsed".to_string(),
        }
    }
}

/// Reports for one batch of captures, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub generated_at: String,
    pub tool_version: String,
    pub reports: Vec<ParseReport>,
}

impl ReportBundle {
    pub fn new(tool_version: &str, reports: Vec<ParseReport>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: tool_version.to_string(),
            reports,
        }
    }

    /// Total records across all reports.
    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|report| report.records).sum()
    }

    /// Counts of each failure code, in first-seen order.
    pub fn failure_code_summary(&self) -> Vec<(FailureCode, usize)> {
        let mut summary: Vec<(FailureCode, usize)> = Vec::new();
        for code in self.reports.iter().filter_map(|report| report.failure_code) {
            match summary.iter_mut().find(|(seen, _)| *seen == code) {
                Some((_, count)) => *count += 1,
                None => summary.push((code, 1)),
            }
        }
        summary
    }
}
