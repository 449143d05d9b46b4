//! Filtering and counting of active physical interfaces.
//!
//! Each eligible sheet is reduced to an immutable [`GroupSummary`]; a
//! separate [`combine`] step concatenates the per-sheet blocks into the
//! speed and type tables and places separator rows between them.

use std::collections::HashMap;

use netscrape_core::{AggregationConfig, SummaryDimension, SummaryRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SummaryError};
use crate::sheet::{SheetTable, Workbook};

/// Columns a sheet must expose to be aggregated. `Type` is optional.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Status", "Speed", "Name"];

/// Returns `true` if `sheet` exposes every [`REQUIRED_COLUMNS`] entry.
pub fn is_eligible(sheet: &SheetTable) -> bool {
    REQUIRED_COLUMNS.iter().all(|column| sheet.has_column(column))
}

/// Number of rows sharing one key. A `None` key is a missing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: Option<String>,
    pub count: usize,
}

/// Counts for one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub switch: String,
    /// Rows whose status matched.
    pub connected: usize,
    pub excluded_by_name: usize,
    /// Rows surviving the name filter but dropped for their speed.
    pub excluded_by_speed: usize,
    pub speed: Vec<KeyCount>,
    /// Type counts; `None` when the sheet has no `Type` column.
    pub types: Option<Vec<KeyCount>>,
}

impl GroupSummary {
    /// Rows that were counted.
    pub fn counted(&self) -> usize {
        self.connected - self.excluded_by_name - self.excluded_by_speed
    }
}

/// Filters and counts one sheet, or returns `None` if it is not eligible.
pub fn summarize_sheet(sheet: &SheetTable, config: &AggregationConfig) -> Option<GroupSummary> {
    if !is_eligible(sheet) {
        debug!(sheet = %sheet.name, "Skipping sheet without required columns");
        return None;
    }
    let has_type = sheet.has_column(SummaryDimension::Type.column());

    let mut connected = 0usize;
    let mut excluded_by_name = 0usize;
    let mut excluded_by_speed = 0usize;
    let mut kept = Vec::new();

    for row in 0..sheet.row_count() {
        let status = sheet.cell(row, "Status").unwrap_or_default();
        if !config.is_connected(status) {
            continue;
        }
        connected += 1;
        if config.is_excluded_name(sheet.cell(row, "Name").unwrap_or_default()) {
            excluded_by_name += 1;
            continue;
        }
        if config.is_excluded_speed(sheet.cell(row, "Speed").unwrap_or_default()) {
            excluded_by_speed += 1;
            continue;
        }
        kept.push(row);
    }

    debug!(
        sheet = %sheet.name,
        connected,
        excluded_by_name,
        excluded_by_speed,
        counted = kept.len(),
        "Filtered sheet"
    );

    let speed = count_by(
        kept.iter()
            .map(|&row| sheet.cell(row, SummaryDimension::Speed.column())),
    );
    let types = has_type.then(|| {
        count_by(
            kept.iter()
                .map(|&row| sheet.cell(row, SummaryDimension::Type.column())),
        )
    });

    Some(GroupSummary {
        switch: sheet.name.clone(),
        connected,
        excluded_by_name,
        excluded_by_speed,
        speed,
        types,
    })
}

/// Counts literal keys, most frequent first; ties keep first appearance.
fn count_by<'a>(keys: impl Iterator<Item = Option<&'a str>>) -> Vec<KeyCount> {
    let mut counts: Vec<KeyCount> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for key in keys {
        match index.get(&key) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(KeyCount {
                    key: key.map(str::to_string),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The combined speed and type tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTables {
    pub speed: Vec<SummaryRow>,
    pub types: Vec<SummaryRow>,
}

impl SummaryTables {
    /// Renders both tables as sheets (`Speed Summary`, then `Type Summary`
    /// when any sheet had a `Type` column). Separator rows become blank rows.
    pub fn to_sheets(&self) -> Vec<SheetTable> {
        let mut sheets = vec![rows_to_sheet(
            "Speed Summary",
            SummaryDimension::Speed,
            &self.speed,
        )];
        if !self.types.is_empty() {
            sheets.push(rows_to_sheet(
                "Type Summary",
                SummaryDimension::Type,
                &self.types,
            ));
        }
        sheets
    }
}

fn rows_to_sheet(name: &str, dimension: SummaryDimension, rows: &[SummaryRow]) -> SheetTable {
    let mut sheet = SheetTable::new(name, &["Switch", dimension.column(), "Count"]);
    sheet.rows = rows
        .iter()
        .map(|row| match row {
            SummaryRow::Count { switch, key, count } => {
                vec![Some(switch.clone()), key.clone(), Some(count.to_string())]
            }
            SummaryRow::Separator => vec![None, None, None],
        })
        .collect();
    sheet
}

/// Concatenates per-sheet blocks in order, with one separator before every
/// block of a table except that table's first.
pub fn combine(groups: &[GroupSummary]) -> SummaryTables {
    let mut tables = SummaryTables::default();
    let mut type_blocks = 0usize;

    for (idx, group) in groups.iter().enumerate() {
        append_block(&mut tables.speed, &group.switch, &group.speed, idx > 0);
        if let Some(types) = &group.types {
            append_block(&mut tables.types, &group.switch, types, type_blocks > 0);
            type_blocks += 1;
        }
    }

    tables
}

fn append_block(table: &mut Vec<SummaryRow>, switch: &str, counts: &[KeyCount], separated: bool) {
    if separated {
        table.push(SummaryRow::Separator);
    }
    table.extend(counts.iter().map(|entry| SummaryRow::Count {
        switch: switch.to_string(),
        key: entry.key.clone(),
        count: entry.count,
    }));
}

/// Aggregates every eligible sheet of `workbook`, in sheet order.
///
/// Returns [`SummaryError::NoValidData`] when no sheet is eligible.
pub fn summarize_workbook(workbook: &Workbook, config: &AggregationConfig) -> Result<SummaryTables> {
    let groups: Vec<GroupSummary> = workbook
        .sheets
        .iter()
        .filter_map(|sheet| summarize_sheet(sheet, config))
        .collect();

    if groups.is_empty() {
        return Err(SummaryError::NoValidData);
    }

    info!(
        sheets = workbook.sheets.len(),
        eligible = groups.len(),
        counted = groups.iter().map(GroupSummary::counted).sum::<usize>(),
        "Aggregated workbook"
    );
    Ok(combine(&groups))
}
