//! Evaluation limits and switches.

use serde::Deserialize;

/// Options that bound and tune a single evaluation.
///
/// Deserializes from the `[eval]` table of the host config; missing keys take
/// the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalOptions {
    /// Maximum formula length in characters, including the leading `=`.
    pub max_formula_len: usize,
    /// Maximum nesting of parentheses, unary operators and calls.
    pub max_depth: usize,
    /// Maximum number of cells a single range argument may cover.
    pub max_range_cells: u64,
    /// Allow a function call inside another call's argument list.
    pub nested_calls: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_formula_len: 8192,
            max_depth: 64,
            max_range_cells: 1_000_000,
            nested_calls: false,
        }
    }
}
