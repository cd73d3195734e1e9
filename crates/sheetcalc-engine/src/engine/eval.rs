//! Formula evaluation entry points and the AST interpreter.

use std::cmp::Ordering;

use super::error::{EvalError, Result};
use super::options::EvalOptions;
use super::parser::{BinaryOp, Expr, UnaryOp, parse_expression};
use super::value::{CellSource, EvalResult, Value, parse_numeric, resolve_cell};
use crate::address::Range;
use crate::builtins::{self, Arg};

/// Evaluate `formula` against `cells` with the default [`EvalOptions`].
///
/// A leading `=` is optional. Any failure yields [`EvalResult::Error`].
pub fn evaluate<C: CellSource + ?Sized>(formula: &str, cells: &C) -> EvalResult {
    evaluate_with(formula, cells, &EvalOptions::default())
}

/// Evaluate `formula` against `cells` with explicit limits and switches.
pub fn evaluate_with<C: CellSource + ?Sized>(
    formula: &str,
    cells: &C,
    options: &EvalOptions,
) -> EvalResult {
    match try_evaluate(formula, &cells, options) {
        Ok(value) => value.into(),
        Err(err) => {
            tracing::debug!(formula, error = %err, "formula evaluation failed");
            EvalResult::Error
        }
    }
}

/// Evaluate and keep the error cause.
pub fn try_evaluate(formula: &str, cells: &dyn CellSource, options: &EvalOptions) -> Result<Value> {
    if formula.chars().count() > options.max_formula_len {
        return Err(EvalError::TooLong {
            max: options.max_formula_len,
        });
    }
    let body = formula.strip_prefix('=').unwrap_or(formula);
    let expr = parse_expression(body, options)?;
    Evaluator::new(cells, options).eval(&expr)
}

pub struct Evaluator<'a> {
    cells: &'a dyn CellSource,
    options: &'a EvalOptions,
}

impl<'a> Evaluator<'a> {
    pub fn new(cells: &'a dyn CellSource, options: &'a EvalOptions) -> Self {
        Self { cells, options }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Text(s) => Ok(Value::Text(s.clone())),
            Expr::CellRef(addr) => Ok(resolve_cell(self.cells, addr)),
            Expr::Range(range) => Err(EvalError::RangeAsValue(range.to_string())),
            Expr::Unary { operator, operand } => {
                let n = to_number(self.eval(operand)?)?;
                match operator {
                    UnaryOp::Plus => Ok(Value::Number(n)),
                    UnaryOp::Minus => Ok(Value::Number(-n)),
                }
            }
            Expr::Binary { .. } => self.eval_chain(expr),
            Expr::FunctionCall { name, args } => self.call(name, args),
        }
    }

    /// Operator chains such as `1+2+3+...` parse left-deep and are not
    /// bounded by `max_depth`, so walk the left spine with a loop.
    fn eval_chain(&self, expr: &Expr) -> Result<Value> {
        let mut pending = Vec::new();
        let mut base = expr;
        while let Expr::Binary {
            left,
            operator,
            right,
        } = base
        {
            pending.push((*operator, &**right));
            base = &**left;
        }

        let mut acc = match pending.last() {
            Some((BinaryOp::Concat, _)) => Value::Text(self.eval_text(base)?),
            _ => self.eval(base)?,
        };
        for (operator, right) in pending.into_iter().rev() {
            acc = match operator {
                BinaryOp::Concat => Value::Text(acc.to_text() + &self.eval_text(right)?),
                _ => apply_binary(operator, acc, self.eval(right)?)?,
            };
        }
        Ok(acc)
    }

    /// Operand of `&`: a blank or missing cell joins as empty text.
    fn eval_text(&self, expr: &Expr) -> Result<String> {
        if let Expr::CellRef(addr) = expr
            && self.cells.cell_text(addr).is_none_or(|t| t.trim().is_empty())
        {
            return Ok(String::new());
        }
        Ok(self.eval(expr)?.to_text())
    }

    fn call(&self, name: &str, args: &[Expr]) -> Result<Value> {
        let builtin =
            builtins::lookup(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;
        let args = args
            .iter()
            .map(|arg| self.classify(arg))
            .collect::<Result<Vec<_>>>()?;
        let value = (builtin.func)(&args, self.cells)?;
        check_finite(value)
    }

    /// Literals, references and ranges are passed through as written; any
    /// other expression is evaluated first.
    fn classify(&self, expr: &Expr) -> Result<Arg> {
        match expr {
            Expr::Number(n) => Ok(Arg::Number(*n)),
            Expr::Text(s) => Ok(Arg::Text(s.clone())),
            Expr::CellRef(addr) => Ok(Arg::Reference(*addr)),
            Expr::Range(range) => {
                self.check_range(range)?;
                Ok(Arg::Range(*range))
            }
            other => Ok(match self.eval(other)? {
                Value::Number(n) => Arg::Number(n),
                Value::Text(s) => Arg::Text(s),
            }),
        }
    }

    fn check_range(&self, range: &Range) -> Result<()> {
        let max = self.options.max_range_cells;
        if range.cell_count() > max {
            return Err(EvalError::RangeTooLarge {
                range: range.to_string(),
                max,
            });
        }
        Ok(())
    }
}

fn to_number(value: Value) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Text(s) => parse_numeric(&s).ok_or(EvalError::NotANumber(s)),
    }
}

fn check_finite(value: Value) -> Result<Value> {
    match value {
        Value::Number(n) if !n.is_finite() => Err(EvalError::NonFinite),
        other => Ok(other),
    }
}

fn apply_binary(operator: BinaryOp, left: Value, right: Value) -> Result<Value> {
    let result = match operator {
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (a, b) => Value::Text(a.to_text() + &b.to_text()),
        },
        BinaryOp::Subtract => Value::Number(to_number(left)? - to_number(right)?),
        BinaryOp::Multiply => Value::Number(to_number(left)? * to_number(right)?),
        BinaryOp::Divide => {
            let (a, b) = (to_number(left)?, to_number(right)?);
            if b == 0.0 {
                return Err(EvalError::NonFinite);
            }
            Value::Number(a / b)
        }
        BinaryOp::Concat => Value::Text(left.to_text() + &right.to_text()),
        comparison => {
            let ordering = compare(&left, &right);
            let holds = match comparison {
                BinaryOp::Equal => ordering == Some(Ordering::Equal),
                BinaryOp::NotEqual => ordering != Some(Ordering::Equal),
                BinaryOp::Less => ordering == Some(Ordering::Less),
                BinaryOp::LessEqual => {
                    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                }
                BinaryOp::Greater => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            };
            Value::Number(if holds { 1.0 } else { 0.0 })
        }
    };
    check_finite(result)
}

/// Numbers compare numerically and text lexicographically. A number against
/// numeric text compares numerically; otherwise both sides compare as text.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Text(b)) => match parse_numeric(b) {
            Some(b) => a.partial_cmp(&b),
            None => Some(left.to_text().cmp(b)),
        },
        (Value::Text(a), Value::Number(b)) => match parse_numeric(a) {
            Some(a) => a.partial_cmp(b),
            None => Some(a.cmp(&right.to_text())),
        },
    }
}
