//! Neighbor record assembly.
//!
//! Walks the lines after a located header, classifies each one through an
//! ordered rule table ([`LINE_RULES`], first match wins), and emits
//! [`NeighborRecord`]s. Listings mix two layouts: an entity id on its own
//! line followed by indented data lines, and id plus data on one line.

use netscrape_core::NeighborRecord;
use tracing::{debug, warn};

use super::header::{ColumnSchema, NeighborColumn, mentions_local_interface};
use super::tokenize::{FieldSpan, tokenize_relative};
use super::util::{has_leading_whitespace, is_dash_line, is_prompt_line};

/// Classification of one listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Blank line or shell prompt; skipped without resetting the current id.
    Noise,
    /// Dash-only table rule.
    Separator,
    /// Unindented line naming the next neighbor.
    EntityId,
    /// Indented data line under the current entity id.
    Continuation,
    /// Id and data on one line, seen before any entity id.
    Combined,
    /// Matches no rule; ignored.
    Unclassified,
}

/// Facts about a line that the classification rules inspect.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub line: &'a str,
    pub has_current_id: bool,
}

/// One entry of the line classification table.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub class: LineClass,
    pub matches: fn(&LineContext<'_>) -> bool,
}

/// Line classification rules, evaluated top to bottom.
pub const LINE_RULES: [LineRule; 5] = [
    LineRule {
        class: LineClass::Noise,
        matches: |ctx| ctx.line.trim().is_empty() || is_prompt_line(ctx.line),
    },
    LineRule {
        class: LineClass::Separator,
        matches: |ctx| is_dash_line(ctx.line),
    },
    LineRule {
        class: LineClass::EntityId,
        matches: |ctx| !has_leading_whitespace(ctx.line) && !mentions_local_interface(ctx.line),
    },
    LineRule {
        class: LineClass::Continuation,
        matches: |ctx| has_leading_whitespace(ctx.line) && ctx.has_current_id,
    },
    LineRule {
        class: LineClass::Combined,
        matches: |ctx| !ctx.line.trim().is_empty() && !ctx.has_current_id,
    },
];

/// Classifies `line` given whether an entity id is currently open.
pub fn classify_line(line: &str, has_current_id: bool) -> LineClass {
    let ctx = LineContext {
        line,
        has_current_id,
    };
    LINE_RULES
        .iter()
        .find(|rule| (rule.matches)(&ctx))
        .map_or(LineClass::Unclassified, |rule| rule.class)
}

/// Records produced from one listing body, plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    pub records: Vec<NeighborRecord>,
    pub skipped_lines: usize,
    pub warnings: Vec<String>,
}

/// Builds neighbor records from the lines following a header.
pub struct NeighborAssembler<'a> {
    source_device: &'a str,
    schema: &'a ColumnSchema,
    data_columns: Vec<NeighborColumn>,
    data_widths: Vec<Option<usize>>,
}

impl<'a> NeighborAssembler<'a> {
    pub fn new(source_device: &'a str, schema: &'a ColumnSchema) -> Self {
        let (data_columns, data_widths) = schema.data_widths().into_iter().unzip();
        Self {
            source_device,
            schema,
            data_columns,
            data_widths,
        }
    }

    /// Assembles records from `body`. `first_line` is the input line number
    /// of `body[0]`, used only for diagnostics.
    pub fn assemble(&self, body: &[&str], first_line: usize) -> Assembled {
        let mut out = Assembled::default();
        let mut current_id: Option<String> = None;

        for (offset, line) in body.iter().enumerate() {
            let line_no = first_line + offset;
            let class = classify_line(line, current_id.is_some());
            debug!(device = %self.source_device, line = line_no, ?class, "Classified listing line");

            match class {
                LineClass::Noise | LineClass::Separator | LineClass::Unclassified => {}
                LineClass::EntityId => current_id = Some(line.trim().to_string()),
                LineClass::Continuation => {
                    let Some(device_id) = current_id.as_deref() else {
                        continue;
                    };
                    out.records.push(self.continuation_record(device_id, line));
                }
                LineClass::Combined => match self.combined_record(line) {
                    Some(record) => out.records.push(record),
                    None => {
                        warn!(device = %self.source_device, line = line_no, "Skipping neighbor line with empty device id");
                        out.skipped_lines += 1;
                        out.warnings.push(format!(
                            "line {}: no device id in combined neighbor line",
                            line_no + 1
                        ));
                    }
                },
            }
        }

        out
    }

    fn continuation_record(&self, device_id: &str, line: &str) -> NeighborRecord {
        let fields = self
            .data_columns
            .iter()
            .copied()
            .zip(tokenize_relative(line, &self.data_widths));
        self.record(device_id.to_string(), fields)
    }

    fn combined_record(&self, line: &str) -> Option<NeighborRecord> {
        let spans: Vec<(NeighborColumn, FieldSpan)> = self.schema.absolute_spans();
        let mut device_id = String::new();
        let mut data = Vec::with_capacity(spans.len());
        for (column, span) in spans {
            let value = span.slice(line);
            if column == NeighborColumn::DeviceId {
                device_id = value;
            } else {
                data.push((column, value));
            }
        }
        if device_id.is_empty() {
            return None;
        }
        Some(self.record(device_id, data))
    }

    fn record(
        &self,
        device_id: String,
        fields: impl IntoIterator<Item = (NeighborColumn, String)>,
    ) -> NeighborRecord {
        let mut record = NeighborRecord {
            source_device: self.source_device.to_string(),
            device_id,
            local_interface: String::new(),
            holdtime: String::new(),
            capability: String::new(),
            platform: String::new(),
            port_id: String::new(),
        };
        for (column, value) in fields {
            match column {
                NeighborColumn::DeviceId => {}
                NeighborColumn::LocalInterface => record.local_interface = value,
                NeighborColumn::Holdtime => record.holdtime = value,
                NeighborColumn::Capability => record.capability = value,
                NeighborColumn::Platform => record.platform = value,
                NeighborColumn::PortId => record.port_id = value,
            }
        }
        record
    }
}
