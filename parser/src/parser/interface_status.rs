//! Interface-status table parsing (`show interface status`).
//!
//! One fixed header spelling; column offsets are the literal positions of the
//! seven column names, found left to right. A header line seen again later in
//! the capture re-derives the offsets.

use netscrape_core::InterfaceRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::tokenize::{FieldSpan, tokenize_absolute};
use super::util::{char_len, char_offset, find_from, is_dash_line, is_prompt_line};

// SAFETY: compile-time constant pattern, exercised by tests below.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Port\s+Name\s+Status\s+Vlan\s+Duplex\s+Speed\s+Type")
        .expect("static regex must compile")
});

/// Returns `true` if `line` is an interface-status header.
pub fn is_interface_header(line: &str) -> bool {
    HEADER_RE.is_match(line)
}

/// Character offsets of the seven interface-status columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceSchema {
    starts: [usize; 7],
}

impl InterfaceSchema {
    /// Derives column offsets from a header line.
    pub fn from_header(header: &str) -> Option<Self> {
        if !is_interface_header(header) {
            return None;
        }
        let mut starts = [0usize; 7];
        let mut cursor = 0usize;
        for (slot, name) in starts.iter_mut().zip(InterfaceRecord::COLUMNS) {
            let byte_pos = find_from(header, name, cursor)?;
            *slot = char_offset(header, byte_pos);
            cursor = byte_pos + name.len();
        }
        Some(Self { starts })
    }

    /// Column start offsets in [`InterfaceRecord::COLUMNS`] order.
    pub fn starts(&self) -> [usize; 7] {
        self.starts
    }

    /// Offset of the last column; shorter lines are not records.
    pub fn type_start(&self) -> usize {
        self.starts[6]
    }

    fn spans(&self) -> Vec<FieldSpan> {
        (0..self.starts.len())
            .map(|idx| {
                // The port field always runs from the start of the line.
                let start = if idx == 0 { 0 } else { self.starts[idx] };
                FieldSpan::new(start, self.starts.get(idx + 1).copied())
            })
            .collect()
    }

    /// Slices one data line into a record.
    pub fn record(&self, line: &str) -> InterfaceRecord {
        let mut fields = tokenize_absolute(line, &self.spans()).into_iter();
        let mut next = || fields.next().unwrap_or_default();
        InterfaceRecord {
            port: next(),
            name: next(),
            status: next(),
            vlan: next(),
            duplex: next(),
            speed: next(),
            kind: next(),
        }
    }
}

/// Result of scanning one capture for interface rows.
#[derive(Debug, Clone, Default)]
pub struct InterfaceScan {
    pub records: Vec<InterfaceRecord>,
    /// Zero-based index of the first header line, if any.
    pub header_line: Option<usize>,
    pub skipped_lines: usize,
    pub warnings: Vec<String>,
    /// Whether a shell prompt ended the table before end of input.
    pub stopped_at_prompt: bool,
}

/// Scans `lines` for an interface-status table and slices every data row.
pub fn scan_interface_status(device: &str, lines: &[&str]) -> InterfaceScan {
    let mut scan = InterfaceScan::default();
    let mut schema: Option<InterfaceSchema> = None;

    for (idx, line) in lines.iter().enumerate() {
        if let Some(found) = InterfaceSchema::from_header(line) {
            debug!(device = %device, line = idx, starts = ?found.starts(), "Located interface-status header");
            scan.header_line.get_or_insert(idx);
            schema = Some(found);
            continue;
        }
        if is_dash_line(line) {
            continue;
        }
        let Some(current) = schema.as_ref() else {
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        if is_prompt_line(line) {
            debug!(device = %device, line = idx, "Prompt ends interface-status table");
            scan.stopped_at_prompt = true;
            break;
        }
        if char_len(line) < current.type_start() {
            warn!(device = %device, line = idx, "Skipping interface line shorter than Type column");
            scan.skipped_lines += 1;
            scan.warnings.push(format!(
                "line {}: too short to reach Type column at offset {}",
                idx + 1,
                current.type_start()
            ));
            continue;
        }
        scan.records.push(current.record(line));
    }

    scan
}
