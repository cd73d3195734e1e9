//! Range-to-series extraction for charts.
//!
//! Rendering is left to the frontend; this module only turns a rectangular
//! range of cells into labelled `(name, value)` points.
//!
//! Header detection: the first row holds column headers when more than half
//! of its non-empty cells are non-numeric, and likewise the first column holds
//! row headers.
//! - both: one point per data row, named by its first cell, summing the row
//!   to the right of the header column
//! - row headers only: one point per row, named by its first cell
//! - column headers only: one point per column, named by its first cell
//! - neither: one point per nonzero numeric cell, named by its address
//!
//! Points whose value is zero are always dropped.

use serde::{Deserialize, Serialize};
use sheetcalc_engine::{Address, CellSource, Range, index_to_column, parse_numeric};

use crate::document::Sheet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
}

struct Headers {
    rows: bool,
    columns: bool,
}

fn text_at<'a>(cells: &'a dyn CellSource, col: u32, row: u32) -> Option<&'a str> {
    Address::new(col, row).and_then(|addr| cells.cell_text(&addr))
}

fn number_at(cells: &dyn CellSource, col: u32, row: u32) -> f64 {
    text_at(cells, col, row).and_then(parse_numeric).unwrap_or(0.0)
}

/// More than half of the non-empty cells are non-numeric.
fn mostly_text<'a>(values: impl Iterator<Item = Option<&'a str>>) -> bool {
    let (mut total, mut text) = (0usize, 0usize);
    for value in values.flatten().filter(|v| !v.is_empty()) {
        total += 1;
        if parse_numeric(value).is_none() {
            text += 1;
        }
    }
    total > 0 && text * 2 > total
}

fn detect_headers(cells: &dyn CellSource, range: &Range) -> Headers {
    let (c1, r1) = (range.start.column(), range.start.row());
    let (c2, r2) = (range.end.column(), range.end.row());
    Headers {
        columns: mostly_text((c1..=c2).map(|col| text_at(cells, col, r1))),
        rows: mostly_text((r1..=r2).map(|row| text_at(cells, c1, row))),
    }
}

/// Label from a header cell, or `fallback` when the cell is blank.
fn label(cells: &dyn CellSource, col: u32, row: u32, fallback: impl FnOnce() -> String) -> String {
    match text_at(cells, col, row) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback(),
    }
}

/// Extract chart points from `range`. Reversed ranges yield nothing.
pub fn extract_series(cells: &dyn CellSource, range: &Range) -> Vec<SeriesPoint> {
    let (c1, r1) = (range.start.column(), range.start.row());
    let (c2, r2) = (range.end.column(), range.end.row());
    let headers = detect_headers(cells, range);

    let row_sum = |row: u32| (c1..=c2).skip(1).map(|col| number_at(cells, col, row)).sum::<f64>();
    let row_label = |row: u32| label(cells, c1, row, || format!("Row {}", row));

    let mut points = Vec::new();
    match headers {
        Headers {
            rows: true,
            columns: true,
        } => {
            for row in (r1..=r2).skip(1) {
                points.push(SeriesPoint {
                    name: row_label(row),
                    value: row_sum(row),
                });
            }
        }
        Headers { rows: true, .. } => {
            for row in r1..=r2 {
                points.push(SeriesPoint {
                    name: row_label(row),
                    value: row_sum(row),
                });
            }
        }
        Headers { columns: true, .. } => {
            for col in c1..=c2 {
                let name = label(cells, col, r1, || {
                    format!("Col {}", index_to_column(col).unwrap_or_default())
                });
                let value = (r1..=r2).skip(1).map(|row| number_at(cells, col, row)).sum();
                points.push(SeriesPoint { name, value });
            }
        }
        Headers { .. } => {
            for row in r1..=r2 {
                for col in c1..=c2 {
                    let Some(addr) = Address::new(col, row) else {
                        continue;
                    };
                    let value = number_at(cells, col, row);
                    points.push(SeriesPoint {
                        name: addr.to_string(),
                        value,
                    });
                }
            }
        }
    }

    points.retain(|point| point.value != 0.0);
    points
}

impl Sheet {
    /// Chart points for a range of this sheet's display values.
    pub fn chart_series(&self, range: &Range) -> Vec<SeriesPoint> {
        extract_series(self, range)
    }
}
