//! Formula engine API.
//!
//! - [`evaluate`], [`evaluate_with`] - Evaluate a formula against a cell snapshot
//! - [`CellSource`] - Read-only view of cell contents
//! - [`EvalOptions`] - Limits and switches for a single evaluation
//! - [`parse_expression`] - Formula text to [`Expr`] tree
//! - [`offset_formula_references`] - Shift references when a formula moves

mod error;
mod eval;
mod lexer;
mod options;
mod parser;
mod references;
mod value;

pub use error::{EvalError, Result};
pub use eval::{Evaluator, evaluate, evaluate_with, try_evaluate};
pub use lexer::{Lexer, Spanned, Token};
pub use options::EvalOptions;
pub use parser::{BinaryOp, Expr, Parser, UnaryOp, parse_expression};
pub use references::{REF_ERROR, offset_formula_references};
pub use value::{
    CellSource, ERROR_SENTINEL, EvalResult, Value, format_number, parse_numeric, resolve_cell,
};
