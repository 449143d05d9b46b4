//! Column-addressed sheet tables.

use netscrape_core::InterfaceRecord;
use serde::{Deserialize, Serialize};

/// Longest sheet name a spreadsheet accepts.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Column of the placeholder sheet written for a device with no rows.
pub const INFO_COLUMN: &str = "Info";

/// Placeholder cell text for a device with no rows.
pub const NO_DATA_MESSAGE: &str = "No data parsed";

/// Column of the sheet written for a device whose capture failed.
pub const ERROR_COLUMN: &str = "Error";

/// One named table. A `None` cell is a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl SheetTable {
    /// Creates an empty sheet; the name is cut to [`MAX_SHEET_NAME_CHARS`].
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: sheet_name(name),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds the seven-column interface sheet for one device.
    ///
    /// A device with no records becomes an `Info` sheet carrying
    /// [`NO_DATA_MESSAGE`], which no aggregation treats as eligible.
    ///
    /// # Examples
    ///
    /// ```
    /// use netscrape_summary::SheetTable;
    ///
    /// let sheet = SheetTable::from_interfaces("acc-sw9", &[]);
    /// assert_eq!(sheet.columns, ["Info"]);
    /// assert_eq!(sheet.cell(0, "Info"), Some("No data parsed"));
    /// ```
    pub fn from_interfaces(name: &str, records: &[InterfaceRecord]) -> Self {
        if records.is_empty() {
            let mut sheet = Self::new(name, &[INFO_COLUMN]);
            sheet.rows.push(vec![Some(NO_DATA_MESSAGE.to_string())]);
            return sheet;
        }

        let mut sheet = Self::new(name, &InterfaceRecord::COLUMNS);
        sheet.rows = records
            .iter()
            .map(|record| {
                record
                    .values()
                    .into_iter()
                    .map(|value| Some(value.to_string()))
                    .collect()
            })
            .collect();
        sheet
    }

    /// One-cell `Error` sheet for a device whose capture could not be
    /// obtained. Never eligible for aggregation.
    pub fn error(name: &str, message: &str) -> Self {
        let mut sheet = Self::new(name, &[ERROR_COLUMN]);
        sheet.rows.push(vec![Some(message.to_string())]);
        sheet
    }

    /// Index of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in column `name`; `None` when absent or missing.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Cuts `name` to the spreadsheet sheet-name limit.
pub fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

/// Ordered collection of sheets; sheet order is group order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<SheetTable>,
}

impl Workbook {
    pub fn new(sheets: Vec<SheetTable>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetTable> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface(port: &str, speed: &str) -> InterfaceRecord {
        InterfaceRecord {
            port: port.to_string(),
            name: String::new(),
            status: "connected".to_string(),
            vlan: "1".to_string(),
            duplex: "a-full".to_string(),
            speed: speed.to_string(),
            kind: "10/100/1000BaseTX".to_string(),
        }
    }

    #[test]
    fn test_sheet_name_capped() {
        let long = "building-a-floor-3-idf-west-access-01.example.com";
        let sheet = SheetTable::new(long, &["Port"]);
        assert_eq!(sheet.name.chars().count(), MAX_SHEET_NAME_CHARS);
        assert!(long.starts_with(&sheet.name));
        assert_eq!(sheet_name("short"), "short");
    }

    #[test]
    fn test_from_interfaces_uses_table_columns() {
        let sheet = SheetTable::from_interfaces("acc-sw3", &[interface("Gi1/0/1", "a-1000")]);
        assert_eq!(sheet.columns, InterfaceRecord::COLUMNS);
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.cell(0, "Speed"), Some("a-1000"));
        assert_eq!(sheet.cell(0, "Name"), Some(""));
        assert_eq!(sheet.cell(1, "Speed"), None);
        assert_eq!(sheet.cell(0, "Missing"), None);
    }

    #[test]
    fn test_error_sheet_carries_message() {
        let sheet = SheetTable::error("acc-sw4", "Failed to read 'acc-sw4.txt'");
        assert_eq!(sheet.columns, [ERROR_COLUMN]);
        assert_eq!(sheet.cell(0, "Error"), Some("Failed to read 'acc-sw4.txt'"));
        assert!(!sheet.has_column("Status"));
    }

    #[test]
    fn test_missing_cells_are_none() {
        let mut sheet = SheetTable::new("s", &["Status", "Speed"]);
        sheet.rows.push(vec![Some("connected".to_string())]);
        sheet.rows.push(vec![Some("connected".to_string()), None]);
        assert_eq!(sheet.cell(0, "Speed"), None);
        assert_eq!(sheet.cell(1, "Speed"), None);
    }

    #[test]
    fn test_workbook_deserializes_missing_rows_and_null_cells() {
        let json = r#"{"sheets":[{"name":"a","columns":["Status"]},{"name":"b","columns":["Speed"],"rows":[[null]]}]}"#;
        let workbook: Workbook = serde_json::from_str(json).unwrap();
        assert_eq!(workbook.sheets.len(), 2);
        assert!(workbook.sheet("a").unwrap().rows.is_empty());
        assert_eq!(workbook.sheet("b").unwrap().rows[0][0], None);
    }
}
