//! Reference rewriting for moved formulas.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::address::parse_address;

/// Text a reference becomes when it is pushed off the grid.
pub const REF_ERROR: &str = "#REF!";

fn cell_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z]+)([0-9]+)\b").expect("cell reference regex must compile"))
}

/// Offset every cell reference in a formula by a column/row delta.
/// Used by paste so pasted formulas keep their relative references.
///
/// Rules:
/// - `A1` offset by (+1, +2) becomes `B3`
/// - ranges are offset on both ends: `SUM(A1:B2)` -> `SUM(B3:C4)`
/// - refs that move above row 1 or left of column A become `#REF!`
/// - text inside `"..."` literals and function names are left alone
pub fn offset_formula_references(formula: &str, delta_col: i64, delta_row: i64) -> String {
    if delta_col == 0 && delta_row == 0 {
        return formula.to_string();
    }

    let offset_segment = |seg: &str| {
        cell_ref_re()
            .replace_all(seg, |caps: &Captures| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let end = caps.get(0).map_or(0, |m| m.end());
                if seg[end..].starts_with('(') {
                    return whole.to_string();
                }
                match parse_address(whole) {
                    Some(addr) => match addr.offset(delta_col, delta_row) {
                        Some(moved) => moved.to_string(),
                        None => REF_ERROR.to_string(),
                    },
                    None => whole.to_string(),
                }
            })
            .into_owned()
    };

    let mut out = String::with_capacity(formula.len());
    let mut in_string = false;
    let mut seg_start = 0;

    // A doubled quote inside a literal closes and reopens it, which leaves the
    // text between the two quotes empty; no special case is needed.
    for (i, ch) in formula.char_indices() {
        if ch != '"' {
            continue;
        }
        if in_string {
            out.push_str(&formula[seg_start..=i]);
            seg_start = i + 1;
        } else {
            out.push_str(&offset_segment(&formula[seg_start..i]));
            seg_start = i;
        }
        in_string = !in_string;
    }

    let rest = &formula[seg_start..];
    if in_string {
        out.push_str(rest);
    } else {
        out.push_str(&offset_segment(rest));
    }
    out
}
