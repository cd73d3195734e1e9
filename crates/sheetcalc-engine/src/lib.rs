//! Formula evaluation for sheetcalc.
//!
//! [`address`] holds the A1 addressing model, [`engine`] the tokenizer,
//! parser and interpreter, and [`builtins`] the function library.

pub mod address;
pub mod builtins;
pub mod engine;

pub use address::{
    Address, AddressError, Range, column_to_index, enumerate, index_to_column, parse_address,
    parse_range,
};
pub use engine::{
    CellSource, ERROR_SENTINEL, EvalError, EvalOptions, EvalResult, evaluate, evaluate_with,
    format_number, parse_numeric,
};
