//! Internal evaluation errors.
//!
//! Callers of [`evaluate`](super::evaluate) never see these: every variant
//! collapses to the `#ERROR!` sentinel. They exist so the lexer, parser and
//! interpreter can propagate with `?` and so the cause can be logged.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Unknown name: {0}")]
    UnknownName(String),

    #[error("Nested call to {0} is not supported")]
    NestedCall(String),

    #[error("Range {0} cannot be used as a value")]
    RangeAsValue(String),

    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Result is not finite")]
    NonFinite,

    #[error("Formula is longer than {max} characters")]
    TooLong { max: usize },

    #[error("Formula nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("Range {range} covers more than {max} cells")]
    RangeTooLarge { range: String, max: u64 },
}

pub type Result<T> = std::result::Result<T, EvalError>;
