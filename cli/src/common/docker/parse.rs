//! # ImgRS Tabular Output Parsing
//!
//! File: cli/src/common/docker/parse.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! The runtime's listing commands print column-aligned tables: a header line
//! followed by one line per object. This module turns such text into rows of
//! trimmed string fields. It knows nothing about images or containers; the
//! registries map rows onto typed records.
//!
//! ## Architecture
//!
//! One interface, `ColumnLayout::parse_rows(text, expected_headers)`, with two
//! strategies that make different trade-offs:
//!
//! - **`CollapsedColumns`**: splits each line on runs of two or more spaces.
//!   Lenient: a line that yields fewer fields than there are headers is
//!   dropped and parsing carries on. Cannot cope with values that themselves
//!   contain double spaces.
//! - **`FixedColumns`**: locates each header in the header line and slices
//!   every data line at those offsets. Precise: values with embedded spaces
//!   (commands, statuses) survive intact. Strict: a missing header is an
//!   `ImgrsError::Parse` before any data line is looked at.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imgrs::common::docker::parse::{ColumnLayout, FixedColumns};
//!
//! let rows = FixedColumns.parse_rows(&stdout, &["CONTAINER ID", "IMAGE", "NAMES"])?;
//! ```
//!
use crate::core::error::{ImgrsError, Result};
use tracing::trace;

/// One parsed data line: a field per expected header, in header order.
pub type Row = Vec<String>;

/// Strategy for splitting column-aligned listing output into rows.
pub trait ColumnLayout {
    /// Parses `text` (header line first) into rows of `expected_headers.len()` fields.
    fn parse_rows(&self, text: &str, expected_headers: &[&str]) -> Result<Vec<Row>>;
}

/// Delimiter-collapse strategy: fields are separated by two or more spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapsedColumns;

impl ColumnLayout for CollapsedColumns {
    fn parse_rows(&self, text: &str, expected_headers: &[&str]) -> Result<Vec<Row>> {
        let wanted = expected_headers.len();
        let rows = text
            .lines()
            .skip(1) // Header line.
            .filter_map(|line| {
                let fields: Vec<String> = line
                    .split("  ")
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect();
                if fields.len() < wanted {
                    trace!("Dropping short listing line ({} of {} fields): {:?}", fields.len(), wanted, line);
                    return None;
                }
                Some(fields.into_iter().take(wanted).collect())
            })
            .collect();
        Ok(rows)
    }
}

/// Fixed-offset strategy: fields are sliced at the header positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColumns;

impl FixedColumns {
    /// Byte offset of each expected header within `header_line`.
    ///
    /// Headers are searched left to right, each one after the previous, so a
    /// header name that happens to occur inside an earlier one is not picked up.
    fn column_offsets(header_line: &str, expected_headers: &[&str]) -> Result<Vec<usize>> {
        let mut offsets = Vec::with_capacity(expected_headers.len());
        let mut search_from = 0;
        for header in expected_headers {
            let found = header_line
                .get(search_from..)
                .and_then(|rest| rest.find(header))
                .map(|pos| search_from + pos)
                .ok_or_else(|| {
                    ImgrsError::Parse(format!(
                        "expected column header '{}' not found in {:?}",
                        header, header_line
                    ))
                })?;
            offsets.push(found);
            search_from = found + header.len();
        }
        Ok(offsets)
    }
}

impl ColumnLayout for FixedColumns {
    fn parse_rows(&self, text: &str, expected_headers: &[&str]) -> Result<Vec<Row>> {
        let mut lines = text.lines();
        let header_line = lines.next().unwrap_or_default();
        let offsets = Self::column_offsets(header_line, expected_headers)?;

        let rows = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                (0..offsets.len())
                    .map(|i| {
                        // First column absorbs anything left of its header.
                        let start = if i == 0 { 0 } else { offsets[i] };
                        let end = offsets.get(i + 1).copied();
                        slice_column(line, start, end).trim().to_string()
                    })
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

/// Slices `line[start..end]`, clamped to the line length and to char boundaries.
///
/// `end == None` means "to end of line". Data lines can be shorter than the
/// header (trailing empty columns) or contain multi-byte characters.
fn slice_column(line: &str, start: usize, end: Option<usize>) -> &str {
    let start = floor_char_boundary(line, start.min(line.len()));
    let end = floor_char_boundary(line, end.unwrap_or(line.len()).min(line.len()));
    if start >= end {
        return "";
    }
    &line[start..end]
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
