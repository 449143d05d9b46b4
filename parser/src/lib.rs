//! Fixed-width table parsing for network-device CLI output.
//!
//! This crate turns captured command output into typed records:
//!
//! - [`parse_neighbor_output`]: neighbor-discovery listings into
//!   [`NeighborRecord`]s, tolerating the header spellings of different
//!   software releases and both single-line and id-then-data layouts.
//! - [`parse_interface_status_output`]: interface-status tables into
//!   [`InterfaceRecord`]s.
//!
//! Parsing never fails. A capture without a recognizable header produces zero
//! records and a [`ParseReport`] carrying
//! [`FailureCode::HeaderNotFound`](report::FailureCode::HeaderNotFound).
//!
//! # Example
//!
//! ```
//! use netscrape_parser::parse_neighbor_output;
//!
//! let raw = "\
//! Device ID        Local Intrfce     Holdtme    Capability  Platform  Port ID
//! dist-sw2(FDO2233X0AB)
//!                  Gig 1/0/1         150        R S I       C9300-48P Gig 1/0/48
//! ";
//!
//! let parsed = parse_neighbor_output("core-sw1", raw);
//! assert_eq!(parsed.records.len(), 1);
//! assert_eq!(parsed.records[0].device_id, "dist-sw2(FDO2233X0AB)");
//! assert_eq!(parsed.records[0].capability, "R S I");
//! assert!(parsed.report.header_found);
//! ```
//!
//! [`NeighborRecord`]: netscrape_core::NeighborRecord
//! [`InterfaceRecord`]: netscrape_core::InterfaceRecord

pub mod parser;
pub mod report;

use netscrape_core::{InterfaceRecord, NeighborRecord};
use parser::header::ColumnSchema;
use parser::{InterfaceStatusParser, NeighborTableParser};
use report::{ParseReport, TableKind};

/// Records and report from one neighbor listing.
#[derive(Debug, Clone)]
pub struct NeighborParse {
    pub records: Vec<NeighborRecord>,
    pub report: ParseReport,
    /// Column schema of the header, when one was found.
    pub schema: Option<ColumnSchema>,
}

/// Records and report from one interface-status table.
#[derive(Debug, Clone)]
pub struct InterfaceParse {
    pub records: Vec<InterfaceRecord>,
    pub report: ParseReport,
}

/// Parses a neighbor-discovery capture taken from `device`.
///
/// # Examples
///
/// ```
/// use netscrape_parser::parse_neighbor_output;
/// use netscrape_parser::report::FailureCode;
///
/// let parsed = parse_neighbor_output("core-sw1", "% CDP is not enabled");
/// assert!(parsed.records.is_empty());
/// assert_eq!(parsed.report.failure_code, Some(FailureCode::HeaderNotFound));
/// ```
pub fn parse_neighbor_output(device: &str, raw: &str) -> NeighborParse {
    let mut parser = NeighborTableParser::new(device, raw);
    let records = parser.parse();
    let report = ParseReport::new(
        device,
        TableKind::Neighbors,
        parser.header_line(),
        records.len(),
        parser.skipped_lines(),
        parser.warnings().to_vec(),
    );
    NeighborParse {
        records,
        report,
        schema: parser.schema().cloned(),
    }
}

/// Parses an interface-status capture taken from `device`.
pub fn parse_interface_status_output(device: &str, raw: &str) -> InterfaceParse {
    let mut parser = InterfaceStatusParser::new(device, raw);
    let records = parser.parse();
    let report = ParseReport::new(
        device,
        TableKind::InterfaceStatus,
        parser.header_line(),
        records.len(),
        parser.skipped_lines(),
        parser.warnings().to_vec(),
    );
    InterfaceParse { records, report }
}
