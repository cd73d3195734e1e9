//! Values, results and the read-only cell snapshot seen by the evaluator.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::address::Address;

/// Display text of a failed evaluation.
pub const ERROR_SENTINEL: &str = "#ERROR!";

/// Read access to cell contents at evaluation time.
///
/// Implementors return the raw stored text of a cell, or `None` when the cell
/// does not exist. The evaluator never writes through this trait.
pub trait CellSource {
    fn cell_text(&self, addr: &Address) -> Option<&str>;
}

impl<T: CellSource + ?Sized> CellSource for &T {
    fn cell_text(&self, addr: &Address) -> Option<&str> {
        (**self).cell_text(addr)
    }
}

impl<S: AsRef<str>> CellSource for HashMap<Address, S> {
    fn cell_text(&self, addr: &Address) -> Option<&str> {
        self.get(addr).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> CellSource for BTreeMap<Address, S> {
    fn cell_text(&self, addr: &Address) -> Option<&str> {
        self.get(addr).map(AsRef::as_ref)
    }
}

/// Snapshots keyed by address text (`"A1"`), as a host map often is.
impl<S: AsRef<str>> CellSource for HashMap<String, S> {
    fn cell_text(&self, addr: &Address) -> Option<&str> {
        self.get(&addr.to_string()).map(AsRef::as_ref)
    }
}

/// An intermediate value inside the interpreter.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Textual form used for concatenation and display.
    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Outcome of evaluating a formula.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalResult {
    Number(f64),
    Text(String),
    Error,
}

impl EvalResult {
    pub fn is_error(&self) -> bool {
        matches!(self, EvalResult::Error)
    }

    /// The string a host stores as the cell's display value.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl From<Value> for EvalResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => EvalResult::Number(n),
            Value::Text(s) => EvalResult::Text(s),
        }
    }
}

impl fmt::Display for EvalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalResult::Number(n) => f.write_str(&format_number(*n)),
            EvalResult::Text(s) => f.write_str(s),
            EvalResult::Error => f.write_str(ERROR_SENTINEL),
        }
    }
}

/// Parse cell text as a number. Only finite values count as numeric.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Value of a referenced cell used as an operand.
///
/// Missing and blank cells are `0`, numeric text is a number, anything else
/// is the raw text.
pub fn resolve_cell<C: CellSource + ?Sized>(cells: &C, addr: &Address) -> Value {
    match cells.cell_text(addr) {
        None => Value::Number(0.0),
        Some(text) if text.trim().is_empty() => Value::Number(0.0),
        Some(text) => match parse_numeric(text) {
            Some(n) => Value::Number(n),
            None => Value::Text(text.to_string()),
        },
    }
}

/// Format a number for display: shortest round-trip form, integers without a
/// fractional part, and no negative zero.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
