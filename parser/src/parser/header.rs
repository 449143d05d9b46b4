//! Header discovery for neighbor-discovery listings.
//!
//! A listing header is recognized by an ordered table of column specs, each
//! naming the spellings different device software releases print for that
//! column. The first line carrying a spelling of every *required* column is
//! the header; the remaining columns are then located left to right, each
//! search starting after the previous marker so a later column can never
//! resolve to text inside an earlier one.
//!
//! The result is a [`ColumnSchema`]: an ordered list of (column, start
//! offset) pairs whose offsets strictly increase.

use serde::Serialize;

use super::tokenize::FieldSpan;
use super::util::{char_offset, find_from};

/// Revision of [`NEIGHBOR_COLUMNS`]; bump whenever spellings change.
pub const HEADER_TABLE_VERSION: u32 = 1;

/// Columns of a neighbor-discovery listing, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborColumn {
    DeviceId,
    LocalInterface,
    Holdtime,
    Capability,
    Platform,
    PortId,
}

/// Accepted spellings for one header column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub column: NeighborColumn,
    /// Full spellings, tried in priority order.
    pub spellings: &'static [&'static str],
    /// Shorter marker used only when no full spelling is present.
    pub fallback: Option<&'static str>,
    /// Whether a line must carry one of `spellings` to count as a header.
    pub required: bool,
}

/// Header spelling table, in column order.
pub const NEIGHBOR_COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec {
        column: NeighborColumn::DeviceId,
        spellings: &["Device ID", "Device-ID", "Device Id"],
        fallback: None,
        required: true,
    },
    ColumnSpec {
        column: NeighborColumn::LocalInterface,
        spellings: &["Local Intrfce", "Local Interface"],
        fallback: Some("Local"),
        required: true,
    },
    ColumnSpec {
        column: NeighborColumn::Holdtime,
        spellings: &["Holdtme", "Hldtme", "Hold Time"],
        fallback: Some("Hold"),
        required: true,
    },
    ColumnSpec {
        column: NeighborColumn::Capability,
        spellings: &["Capability"],
        fallback: None,
        required: false,
    },
    ColumnSpec {
        column: NeighborColumn::Platform,
        spellings: &["Platform"],
        fallback: None,
        required: false,
    },
    ColumnSpec {
        column: NeighborColumn::PortId,
        spellings: &["Port ID", "Port Id"],
        fallback: Some("Port"),
        required: false,
    },
];

impl ColumnSpec {
    fn appears_in(&self, line: &str) -> bool {
        self.spellings.iter().any(|spelling| line.contains(spelling))
    }

    /// Locates this column at or after byte offset `from`, returning the
    /// matched byte offset and marker.
    fn locate(&self, line: &str, from: usize) -> Option<(usize, &'static str)> {
        self.spellings
            .iter()
            .chain(self.fallback.iter())
            .find_map(|marker| find_from(line, marker, from).map(|pos| (pos, *marker)))
    }
}

/// Returns `true` if `line` contains any spelling of the local-interface
/// column.
pub fn mentions_local_interface(line: &str) -> bool {
    NEIGHBOR_COLUMNS
        .iter()
        .filter(|spec| spec.column == NeighborColumn::LocalInterface)
        .any(|spec| spec.appears_in(line))
}

/// A header column resolved to a character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocatedColumn {
    pub column: NeighborColumn,
    /// Character offset of the column marker in the header line.
    pub start: usize,
    /// The spelling that matched.
    pub marker: &'static str,
}

/// Ordered column positions derived from one header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    columns: Vec<LocatedColumn>,
}

impl ColumnSchema {
    /// Located columns in header order.
    pub fn columns(&self) -> &[LocatedColumn] {
        &self.columns
    }

    /// Start offset of `column`, if the header carries it.
    pub fn start(&self, column: NeighborColumn) -> Option<usize> {
        self.columns
            .iter()
            .find(|located| located.column == column)
            .map(|located| located.start)
    }

    /// Width of `column`: distance to the next located column, or `None` when
    /// the column is last (extends to end of line) or absent.
    pub fn width(&self, column: NeighborColumn) -> Option<usize> {
        let idx = self.columns.iter().position(|c| c.column == column)?;
        self.columns
            .get(idx + 1)
            .map(|next| next.start - self.columns[idx].start)
    }

    /// Absolute field spans, one per located column.
    pub fn absolute_spans(&self) -> Vec<(NeighborColumn, FieldSpan)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, located)| {
                let end = self.columns.get(idx + 1).map(|next| next.start);
                (located.column, FieldSpan::new(located.start, end))
            })
            .collect()
    }

    /// Widths of every column after the device id, for slicing continuation
    /// lines relative to their indentation.
    pub fn data_widths(&self) -> Vec<(NeighborColumn, Option<usize>)> {
        self.columns
            .iter()
            .filter(|located| located.column != NeighborColumn::DeviceId)
            .map(|located| (located.column, self.width(located.column)))
            .collect()
    }
}

/// A located header and its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Zero-based index of the header line.
    pub line_index: usize,
    pub schema: ColumnSchema,
}

/// Returns `true` if `line` carries a spelling of every required column.
pub fn is_neighbor_header(line: &str) -> bool {
    NEIGHBOR_COLUMNS
        .iter()
        .filter(|spec| spec.required)
        .all(|spec| spec.appears_in(line))
}

/// Resolves column offsets for a header line.
///
/// Returns `None` when a required column cannot be placed after the columns
/// before it.
pub fn build_schema(header: &str) -> Option<ColumnSchema> {
    let mut columns = Vec::with_capacity(NEIGHBOR_COLUMNS.len());
    let mut cursor = 0usize;

    for spec in &NEIGHBOR_COLUMNS {
        match spec.locate(header, cursor) {
            Some((byte_pos, marker)) => {
                columns.push(LocatedColumn {
                    column: spec.column,
                    start: char_offset(header, byte_pos),
                    marker,
                });
                cursor = byte_pos + marker.len();
            }
            None if spec.required => return None,
            None => {}
        }
    }

    Some(ColumnSchema { columns })
}

/// Scans `lines` for the first neighbor-listing header.
pub fn locate_neighbor_header(lines: &[&str]) -> Option<HeaderMatch> {
    lines.iter().enumerate().find_map(|(line_index, line)| {
        if !is_neighbor_header(line) {
            return None;
        }
        build_schema(line).map(|schema| HeaderMatch { line_index, schema })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE_SPELLINGS: [&str; 3] = ["Device ID", "Device-ID", "Device Id"];
    const LOCAL_SPELLINGS: [&str; 2] = ["Local Intrfce", "Local Interface"];
    const HOLD_SPELLINGS: [&str; 3] = ["Holdtme", "Hldtme", "Hold Time"];

    fn header(device: &str, local: &str, hold: &str) -> String {
        format!(
            "{device:<17}{local:<17}{hold:<12}{:<12}{:<10}{}",
            "Capability", "Platform", "Port ID"
        )
    }

    #[test]
    fn test_every_spelling_combination_yields_same_columns() {
        let expected = vec![
            (NeighborColumn::DeviceId, 0),
            (NeighborColumn::LocalInterface, 17),
            (NeighborColumn::Holdtime, 34),
            (NeighborColumn::Capability, 46),
            (NeighborColumn::Platform, 58),
            (NeighborColumn::PortId, 68),
        ];

        for device in DEVICE_SPELLINGS {
            for local in LOCAL_SPELLINGS {
                for hold in HOLD_SPELLINGS {
                    let line = header(device, local, hold);
                    assert!(is_neighbor_header(&line), "not a header: {line}");
                    let schema = build_schema(&line).expect("schema");
                    let got: Vec<_> = schema
                        .columns()
                        .iter()
                        .map(|c| (c.column, c.start))
                        .collect();
                    assert_eq!(got, expected, "spellings {device}/{local}/{hold}");
                }
            }
        }
    }

    #[test]
    fn test_offsets_strictly_increase() {
        let line = header("Device ID", "Local Intrfce", "Holdtme");
        let schema = build_schema(&line).unwrap();
        assert!(
            schema
                .columns()
                .windows(2)
                .all(|pair| pair[0].start < pair[1].start)
        );
    }

    #[test]
    fn test_widths_are_differences_and_last_is_open() {
        let line = header("Device ID", "Local Intrfce", "Holdtme");
        let schema = build_schema(&line).unwrap();
        assert_eq!(schema.width(NeighborColumn::DeviceId), Some(17));
        assert_eq!(schema.width(NeighborColumn::Capability), Some(12));
        assert_eq!(schema.width(NeighborColumn::Platform), Some(10));
        assert_eq!(schema.width(NeighborColumn::PortId), None);

        let widths = schema.data_widths();
        assert_eq!(widths.first(), Some(&(NeighborColumn::LocalInterface, Some(17))));
        assert_eq!(widths.last(), Some(&(NeighborColumn::PortId, None)));
        assert_eq!(widths.len(), 5);
    }

    #[test]
    fn test_missing_header_yields_none() {
        let lines = [
            "Capability Codes: R - Router, T - Trans Bridge, B - Source Route Bridge",
            "Device ID    Platform",
            "",
        ];
        assert!(locate_neighbor_header(&lines).is_none());
    }

    #[test]
    fn test_locate_reports_line_index() {
        let head = header("Device-ID", "Local Interface", "Hldtme");
        let lines = ["core-sw1#show cdp neighbors", "", head.as_str(), "sw2"];
        let found = locate_neighbor_header(&lines).unwrap();
        assert_eq!(found.line_index, 2);
        assert_eq!(found.schema.columns()[0].marker, "Device-ID");
    }

    #[test]
    fn test_port_fallback_when_port_id_spelled_differently() {
        let line = "Device ID        Local Intrfce     Holdtme    Capability  Platform  Port";
        let schema = build_schema(line).unwrap();
        let port = schema.columns().last().unwrap();
        assert_eq!(port.column, NeighborColumn::PortId);
        assert_eq!(port.marker, "Port");
        assert_eq!(port.start, 68);
    }

    #[test]
    fn test_later_columns_searched_after_previous_marker() {
        // "Platform" text inside the device-id region must not be picked up.
        let line = "Device ID Platform  Local Intrfce  Holdtme  Capability  Platform  Port ID";
        let schema = build_schema(line).unwrap();
        assert_eq!(schema.start(NeighborColumn::Platform), Some(56));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let line = "Device ID        Local Intrfce     Holdtme";
        let schema = build_schema(line).unwrap();
        assert_eq!(schema.columns().len(), 3);
        assert_eq!(schema.start(NeighborColumn::Capability), None);
        assert_eq!(schema.width(NeighborColumn::Holdtime), None);
    }

    #[test]
    fn test_mentions_local_interface() {
        assert!(mentions_local_interface("x Local Intrfce y"));
        assert!(mentions_local_interface("Local Interface"));
        assert!(!mentions_local_interface("Local"));
    }
}
