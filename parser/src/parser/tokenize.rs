//! Fixed-width row tokenization.
//!
//! Two slicing modes are supported:
//!
//! - **Absolute**: fields are cut at header-derived character offsets. Used
//!   when an entity id and its data share a line.
//! - **Indentation-relative**: the line's leading whitespace marks where data
//!   starts, and each field is cut using the header-derived *widths* added
//!   successively from that point; the last field takes the remainder. Used
//!   for continuation lines under an entity id printed on its own line. This
//!   assumes the continuation line keeps the header's column widths.
//!
//! Lines too short for a column produce empty fields rather than errors.

use super::util::{indentation, slice_trimmed};

/// A field's character range: `start..end`, or `start..` when `end` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub start: usize,
    pub end: Option<usize>,
}

impl FieldSpan {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// Extracts and trims this span from `line`.
    pub fn slice(&self, line: &str) -> String {
        slice_trimmed(line, self.start, self.end)
    }
}

/// Slices `line` at absolute offsets, one trimmed field per span.
pub fn tokenize_absolute(line: &str, spans: &[FieldSpan]) -> Vec<String> {
    spans.iter().map(|span| span.slice(line)).collect()
}

/// Slices `line` starting at its indentation, one trimmed field per width.
///
/// A `None` width consumes the rest of the line; any widths after it yield
/// empty fields.
pub fn tokenize_relative(line: &str, widths: &[Option<usize>]) -> Vec<String> {
    relative_spans(indentation(line), widths)
        .iter()
        .map(|span| span.slice(line))
        .collect()
}

/// Builds spans by successively adding `widths` to `data_start`.
pub fn relative_spans(data_start: usize, widths: &[Option<usize>]) -> Vec<FieldSpan> {
    let mut spans = Vec::with_capacity(widths.len());
    let mut cursor = Some(data_start);

    for width in widths {
        match (cursor, width) {
            (Some(start), Some(width)) => {
                spans.push(FieldSpan::new(start, Some(start + width)));
                cursor = Some(start + width);
            }
            (Some(start), None) => {
                spans.push(FieldSpan::new(start, None));
                cursor = None;
            }
            // Everything after an open-ended field is already consumed.
            (None, _) => spans.push(FieldSpan::new(usize::MAX, Some(usize::MAX))),
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_slicing() {
        let line = "sw2              Gig 1/0/1        150         R S I       C9300     Gig 1/0/48";
        let spans = [
            FieldSpan::new(0, Some(17)),
            FieldSpan::new(17, Some(34)),
            FieldSpan::new(34, Some(46)),
            FieldSpan::new(46, Some(58)),
            FieldSpan::new(58, Some(68)),
            FieldSpan::new(68, None),
        ];
        assert_eq!(
            tokenize_absolute(line, &spans),
            ["sw2", "Gig 1/0/1", "150", "R S I", "C9300", "Gig 1/0/48"]
        );
    }

    #[test]
    fn test_relative_slicing_uses_widths_from_indentation() {
        // Data starts at column 3, not at the header's local-interface offset.
        let line = "   Gig 1/0/1        150         R S I       C9300     Gig 1/0/48";
        let widths = [Some(17), Some(12), Some(12), Some(10), None];
        assert_eq!(
            tokenize_relative(line, &widths),
            ["Gig 1/0/1", "150", "R S I", "C9300", "Gig 1/0/48"]
        );
    }

    #[test]
    fn test_relative_spans_accumulate() {
        let spans = relative_spans(4, &[Some(3), Some(2), None]);
        assert_eq!(
            spans,
            vec![
                FieldSpan::new(4, Some(7)),
                FieldSpan::new(7, Some(9)),
                FieldSpan::new(9, None),
            ]
        );
    }

    #[test]
    fn test_short_line_degrades_to_empty_fields() {
        let widths = [Some(17), Some(12), Some(12), Some(10), None];
        assert_eq!(
            tokenize_relative("   Gig 1/0/1", &widths),
            ["Gig 1/0/1", "", "", "", ""]
        );
    }

    #[test]
    fn test_fields_after_open_width_are_empty() {
        assert_eq!(tokenize_relative(" a b", &[None, Some(3)]), ["a b", ""]);
    }
}
