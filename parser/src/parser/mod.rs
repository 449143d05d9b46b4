//! Fixed-width table parsers for network-device CLI captures.
//!
//! Two tables are supported:
//!
//! - **Neighbor listings** (`show cdp neighbors`): the header is found through
//!   a spelling table ([`header::NEIGHBOR_COLUMNS`]), then each following line
//!   is classified by an ordered rule table ([`assemble::LINE_RULES`]) and
//!   sliced in absolute or indentation-relative mode.
//! - **Interface status** (`show interface status`): one fixed header, every
//!   data row sliced at absolute offsets until a shell prompt.
//!
//! Captures are normalized first ([`normalize::normalize_capture`]). Neither
//! parser fails: a missing header yields zero records, and malformed lines
//! are skipped and counted.
//!
//! The entry points are [`NeighborTableParser`] and [`InterfaceStatusParser`];
//! most consumers should use [`parse_neighbor_output`](crate::parse_neighbor_output)
//! and [`parse_interface_status_output`](crate::parse_interface_status_output).

pub mod assemble;
pub mod header;
pub mod interface_status;
pub mod normalize;
pub mod tokenize;
mod util;

use netscrape_core::{InterfaceRecord, NeighborRecord};
use tracing::{debug, warn};

use assemble::NeighborAssembler;
use header::{ColumnSchema, HEADER_TABLE_VERSION, locate_neighbor_header};
use interface_status::scan_interface_status;
use normalize::normalize_capture;

/// Parser for one device's neighbor-discovery listing.
pub struct NeighborTableParser {
    device: String,
    text: String,
    schema: Option<ColumnSchema>,
    header_line: Option<usize>,
    skipped_lines: usize,
    warnings: Vec<String>,
}

impl NeighborTableParser {
    /// Creates a parser for the capture `raw` taken from `device`.
    pub fn new(device: &str, raw: &str) -> Self {
        Self {
            device: device.to_string(),
            text: normalize_capture(raw),
            schema: None,
            header_line: None,
            skipped_lines: 0,
            warnings: Vec::new(),
        }
    }

    /// Parses the capture into neighbor records, in line order.
    pub fn parse(&mut self) -> Vec<NeighborRecord> {
        let lines: Vec<&str> = self.text.lines().collect();

        let Some(found) = locate_neighbor_header(&lines) else {
            warn!(device = %self.device, "No neighbor header found");
            self.warnings.push("No neighbor-listing header found".to_string());
            return Vec::new();
        };
        debug!(
            device = %self.device,
            line = found.line_index,
            columns = found.schema.columns().len(),
            table_version = HEADER_TABLE_VERSION,
            "Located neighbor header"
        );

        let body_start = found.line_index + 1;
        let body = lines.get(body_start..).unwrap_or_default();
        let assembled = NeighborAssembler::new(&self.device, &found.schema).assemble(body, body_start);

        self.header_line = Some(found.line_index);
        self.schema = Some(found.schema);
        self.skipped_lines = assembled.skipped_lines;
        self.warnings.extend(assembled.warnings);
        assembled.records
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Column schema of the located header, after [`parse`](Self::parse).
    pub fn schema(&self) -> Option<&ColumnSchema> {
        self.schema.as_ref()
    }

    pub fn header_line(&self) -> Option<usize> {
        self.header_line
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Parser for one device's interface-status table.
pub struct InterfaceStatusParser {
    device: String,
    text: String,
    header_line: Option<usize>,
    skipped_lines: usize,
    warnings: Vec<String>,
}

impl InterfaceStatusParser {
    pub fn new(device: &str, raw: &str) -> Self {
        Self {
            device: device.to_string(),
            text: normalize_capture(raw),
            header_line: None,
            skipped_lines: 0,
            warnings: Vec::new(),
        }
    }

    /// Parses the capture into interface records, in line order.
    pub fn parse(&mut self) -> Vec<InterfaceRecord> {
        let lines: Vec<&str> = self.text.lines().collect();
        let scan = scan_interface_status(&self.device, &lines);

        if scan.header_line.is_none() {
            warn!(device = %self.device, "No interface-status header found");
            self.warnings.push("No interface-status header found".to_string());
        }
        self.header_line = scan.header_line;
        self.skipped_lines = scan.skipped_lines;
        self.warnings.extend(scan.warnings);
        scan.records
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn header_line(&self) -> Option<usize> {
        self.header_line
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
