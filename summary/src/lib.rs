//! Per-switch counts of active physical interfaces.
//!
//! Input is a [`Workbook`] of [`SheetTable`]s, one per switch, as produced
//! from parsed interface-status tables. Sheets exposing `Status`, `Speed`,
//! and `Name` are filtered down to connected physical ports (virtual and
//! aggregate names and auto-negotiating speeds are excluded, per
//! [`AggregationConfig`]) and counted by speed and, when present, by type.
//!
//! # Example
//!
//! ```
//! use netscrape_core::{AggregationConfig, InterfaceRecord, SummaryRow};
//! use netscrape_summary::{SheetTable, Workbook, summarize_workbook};
//!
//! let port = InterfaceRecord {
//!     port: "Gi1/0/2".into(),
//!     name: "desk-204".into(),
//!     status: "connected".into(),
//!     vlan: "30".into(),
//!     duplex: "a-full".into(),
//!     speed: "a-1000".into(),
//!     kind: "10/100/1000BaseTX".into(),
//! };
//! let workbook = Workbook::new(vec![SheetTable::from_interfaces("acc-sw3", &[port])]);
//!
//! let tables = summarize_workbook(&workbook, &AggregationConfig::default()).unwrap();
//! assert_eq!(
//!     tables.speed,
//!     vec![SummaryRow::Count { switch: "acc-sw3".into(), key: Some("a-1000".into()), count: 1 }]
//! );
//! ```
//!
//! [`AggregationConfig`]: netscrape_core::AggregationConfig

mod aggregate;
mod error;
mod sheet;

pub use aggregate::{
    GroupSummary, KeyCount, REQUIRED_COLUMNS, SummaryTables, combine, is_eligible,
    summarize_sheet, summarize_workbook,
};
pub use error::{Result, SummaryError};
pub use sheet::{ERROR_COLUMN, INFO_COLUMN, MAX_SHEET_NAME_CHARS, NO_DATA_MESSAGE, SheetTable, Workbook, sheet_name};
