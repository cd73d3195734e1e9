//! Built-in spreadsheet functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing names are ALL CAPS (`SUM`, `AVERAGE`) and are matched
//!   case-sensitively.
//! - Each function receives its arguments already classified as [`Arg`] and a
//!   read-only view of the cells.
//! - If you add a new built-in, add a row to [`BUILTINS`]; nothing else needs
//!   registering.

use crate::address::{Address, Range};
use crate::engine::{CellSource, Result, Value, parse_numeric, resolve_cell};

/// A classified function argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Number(f64),
    Text(String),
    Reference(Address),
    Range(Range),
}

pub type BuiltinFn = fn(&[Arg], &dyn CellSource) -> Result<Value>;

pub struct Builtin {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub func: BuiltinFn,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "SUM",
        usage: "SUM(value, ...)",
        description: "Sum of numeric values",
        func: sum,
    },
    Builtin {
        name: "AVERAGE",
        usage: "AVERAGE(value, ...)",
        description: "Mean of numeric values, 0 when there are none",
        func: average,
    },
    Builtin {
        name: "COUNT",
        usage: "COUNT(value, ...)",
        description: "Count of numeric values",
        func: count,
    },
    Builtin {
        name: "MAX",
        usage: "MAX(value, ...)",
        description: "Largest numeric value, 0 when there are none",
        func: max,
    },
    Builtin {
        name: "MIN",
        usage: "MIN(value, ...)",
        description: "Smallest numeric value, 0 when there are none",
        func: min,
    },
    Builtin {
        name: "CONCATENATE",
        usage: "CONCATENATE(value, ...)",
        description: "Join the text of every argument",
        func: concatenate,
    },
    Builtin {
        name: "IF",
        usage: "IF(condition, then, else)",
        description: "Pick `then` when the condition is truthy, otherwise `else`",
        func: if_fn,
    },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Numbers contributed by the arguments: numeric literals, numeric
/// referenced cells and numeric cells inside ranges. Text, blank and missing
/// cells are skipped.
fn numbers(args: &[Arg], cells: &dyn CellSource) -> Vec<f64> {
    let numeric_cell = |addr: &Address| cells.cell_text(addr).and_then(parse_numeric);

    let mut out = Vec::new();
    for arg in args {
        match arg {
            Arg::Number(n) => out.push(*n),
            Arg::Text(_) => {}
            Arg::Reference(addr) => out.extend(numeric_cell(addr)),
            Arg::Range(range) => out.extend(range.cells().filter_map(|a| numeric_cell(&a))),
        }
    }
    out
}

fn sum(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    Ok(Value::Number(numbers(args, cells).iter().sum()))
}

fn average(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    let values = numbers(args, cells);
    if values.is_empty() {
        return Ok(Value::Number(0.0));
    }
    let total: f64 = values.iter().sum();
    Ok(Value::Number(total / values.len() as f64))
}

fn count(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    Ok(Value::Number(numbers(args, cells).len() as f64))
}

fn max(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    let best = numbers(args, cells).into_iter().reduce(f64::max);
    Ok(Value::Number(best.unwrap_or(0.0)))
}

fn min(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    let best = numbers(args, cells).into_iter().reduce(f64::min);
    Ok(Value::Number(best.unwrap_or(0.0)))
}

fn concatenate(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    // Non-blank cells join by value, so "1.50" joins as "1.5".
    let cell_text = |addr: &Address| match cells.cell_text(addr) {
        Some(text) if !text.trim().is_empty() => resolve_cell(cells, addr).to_text(),
        _ => String::new(),
    };

    let mut out = String::new();
    for arg in args {
        match arg {
            Arg::Number(n) => out.push_str(&Value::Number(*n).to_text()),
            Arg::Text(s) => out.push_str(s),
            Arg::Reference(addr) => out.push_str(&cell_text(addr)),
            Arg::Range(range) => {
                for addr in range.cells() {
                    out.push_str(&cell_text(&addr));
                }
            }
        }
    }
    Ok(Value::Text(out))
}

fn truthy(arg: &Arg, cells: &dyn CellSource) -> bool {
    match arg {
        Arg::Number(n) => *n != 0.0,
        Arg::Text(s) => !s.is_empty(),
        Arg::Reference(addr) => match resolve_cell(cells, addr) {
            Value::Number(n) => n != 0.0,
            Value::Text(s) => !s.is_empty(),
        },
        Arg::Range(_) => true,
    }
}

/// Branches come back as written: a reference or range yields its address
/// text, not the cell contents.
fn branch(arg: Option<&Arg>) -> Value {
    match arg {
        None => Value::Text(String::new()),
        Some(Arg::Number(n)) => Value::Number(*n),
        Some(Arg::Text(s)) => Value::Text(s.clone()),
        Some(Arg::Reference(addr)) => Value::Text(addr.to_string()),
        Some(Arg::Range(range)) => Value::Text(range.to_string()),
    }
}

fn if_fn(args: &[Arg], cells: &dyn CellSource) -> Result<Value> {
    let condition = args.first().is_some_and(|c| truthy(c, cells));
    Ok(if condition {
        branch(args.get(1))
    } else {
        branch(args.get(2))
    })
}
