//! Cell addressing primitives.
//!
//! Bidirectional conversion between spreadsheet-style references (`"A1"`,
//! `"AA100"`) and 1-based column/row coordinates, plus rectangular ranges
//! (`"A1:C5"`) and their row-major enumeration.
//!
//! This module depends on nothing but `std` and nothing else in the crate, so
//! chart, CSV and clipboard code can share it without pulling in the
//! evaluator.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::address::{parse_address, parse_range, enumerate};
//!
//! let cell = parse_address("B3").unwrap();
//! assert_eq!(cell.column(), 2);
//! assert_eq!(cell.row(), 3);
//! assert_eq!(cell.to_string(), "B3");
//!
//! let cells = enumerate(&parse_range("A1:B2").unwrap());
//! let names: Vec<String> = cells.iter().map(|a| a.to_string()).collect();
//! assert_eq!(names, ["A1", "B1", "A2", "B2"]);
//! ```

use std::fmt;
use std::str::FromStr;

/// Errors returned by the `FromStr` implementations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressError {
    InvalidAddress(String),
    InvalidRange(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidAddress(s) => write!(f, "Invalid cell reference: {}", s),
            AddressError::InvalidRange(s) => write!(f, "Invalid range: {}", s),
        }
    }
}

impl std::error::Error for AddressError {}

/// A cell position. Both coordinates are 1-based and always >= 1.
///
/// Ordering is row-major (row first, then column), which matches
/// [`enumerate`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Address {
    row: u32,
    column: u32,
}

impl Address {
    /// Returns `None` if either coordinate is zero.
    pub fn new(column: u32, row: u32) -> Option<Address> {
        if column == 0 || row == 0 {
            return None;
        }
        Some(Address { row, column })
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column letters of this address (`"A"`, `"AA"`, ...).
    pub fn column_letters(&self) -> String {
        letters_for(self.column)
    }

    /// Move by a signed column/row delta. Returns `None` when the result
    /// would fall off the grid (any coordinate < 1) or overflow.
    pub fn offset(&self, delta_col: i64, delta_row: i64) -> Option<Address> {
        let column = i64::from(self.column).checked_add(delta_col)?;
        let row = i64::from(self.row).checked_add(delta_row)?;
        Address::new(u32::try_from(column).ok()?, u32::try_from(row).ok()?)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s).ok_or_else(|| AddressError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", letters_for(self.column), self.row)
    }
}

/// A rectangular span between two corners, inclusive.
///
/// Corners are kept as given. A range whose `end` lies before `start` on
/// either axis covers no cells.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Range {
    pub start: Address,
    pub end: Address,
}

impl Range {
    pub fn new(start: Address, end: Address) -> Range {
        Range { start, end }
    }

    pub fn single(cell: Address) -> Range {
        Range {
            start: cell,
            end: cell,
        }
    }

    /// Number of cells covered, saturating at `u64::MAX`.
    pub fn cell_count(&self) -> u64 {
        if self.end.row < self.start.row || self.end.column < self.start.column {
            return 0;
        }
        let rows = u64::from(self.end.row - self.start.row) + 1;
        let cols = u64::from(self.end.column - self.start.column) + 1;
        rows.saturating_mul(cols)
    }

    /// Row-major iterator over the covered cells.
    pub fn cells(&self) -> Cells {
        Cells {
            range: *self,
            next: if self.cell_count() == 0 {
                None
            } else {
                Some(self.start)
            },
        }
    }
}

impl FromStr for Range {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s).ok_or_else(|| AddressError::InvalidRange(s.to_string()))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Iterator returned by [`Range::cells`].
#[derive(Clone, Debug)]
pub struct Cells {
    range: Range,
    next: Option<Address>,
}

impl Iterator for Cells {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        let current = self.next?;
        self.next = if current.column < self.range.end.column {
            Some(Address {
                row: current.row,
                column: current.column + 1,
            })
        } else if current.row < self.range.end.row {
            Some(Address {
                row: current.row + 1,
                column: self.range.start.column,
            })
        } else {
            None
        };
        Some(current)
    }
}

/// Interpret `letters` as a base-26 numeral with digits A=1 .. Z=26.
///
/// Returns `None` for empty input, anything outside `A`-`Z`, or overflow.
pub fn column_to_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut acc = 0u32;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        let digit = u32::from(b - b'A') + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc)
}

/// Convert a 1-based column index to letters (1 -> A, 26 -> Z, 27 -> AA).
pub fn index_to_column(index: u32) -> Option<String> {
    if index == 0 {
        return None;
    }
    Some(letters_for(index))
}

fn letters_for(index: u32) -> String {
    let mut result = Vec::new();
    let mut n = index;
    while n > 0 {
        n -= 1;
        result.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    result.reverse();
    // Only ASCII uppercase bytes are pushed.
    String::from_utf8(result).unwrap_or_default()
}

/// Parse `[A-Z]+[1-9][0-9]*` with nothing before or after it.
///
/// A row with a leading zero (`A01`) is rejected so that every accepted
/// string formats back to itself.
pub fn parse_address(text: &str) -> Option<Address> {
    let split = text.find(|c: char| !c.is_ascii_uppercase())?;
    let (letters, digits) = text.split_at(split);
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let column = column_to_index(letters)?;
    let row = digits.parse::<u32>().ok()?;
    Address::new(column, row)
}

/// Parse `A1:B2`, or a bare `A1` as a single-cell range.
pub fn parse_range(text: &str) -> Option<Range> {
    let mut parts = text.split(':');
    let first = parts.next()?;
    match (parts.next(), parts.next()) {
        (None, _) => parse_address(first).map(Range::single),
        (Some(second), None) => Some(Range::new(parse_address(first)?, parse_address(second)?)),
        _ => None,
    }
}

/// All cells in `range`, row-major.
pub fn enumerate(range: &Range) -> Vec<Address> {
    range.cells().collect()
}
