use std::collections::HashMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sheetcalc_engine::{
    Address, EvalOptions, EvalResult, column_to_index, enumerate, evaluate, evaluate_with,
    index_to_column, parse_address, parse_range,
};

fn sheet(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(a, v)| (a.to_string(), v.to_string()))
        .collect()
}

#[test]
fn column_round_trip_first_thousand() {
    for i in 1..=1000 {
        let letters = index_to_column(i).unwrap();
        assert_eq!(column_to_index(&letters), Some(i), "column {}", letters);
    }
}

proptest! {
    #[test]
    fn column_round_trip(i in 1u32..=u32::MAX) {
        let letters = index_to_column(i).unwrap();
        prop_assert_eq!(column_to_index(&letters), Some(i));
    }

    #[test]
    fn address_display_round_trip(column in 1u32..100_000, row in 1u32..10_000_000) {
        let addr = Address::new(column, row).unwrap();
        prop_assert_eq!(parse_address(&addr.to_string()), Some(addr));
    }

    #[test]
    fn evaluation_never_panics(formula in "=[A-C1-3+*/()&<>=\",: SUMIF0-9.]{0,24}") {
        let cells = sheet(&[("A1", "1"), ("B2", "x")]);
        let first = evaluate(&formula, &cells);
        prop_assert_eq!(evaluate(&formula, &cells), first);
    }
}

#[test]
fn malformed_addresses_are_rejected() {
    assert_eq!(parse_address("1A"), None);
    assert_eq!(parse_address("A"), None);
    assert_eq!(parse_address("A1B2"), None);
    assert_eq!(parse_address("A0"), None);
    assert_eq!(parse_address("A01"), None);
    assert_eq!(parse_address("a1"), None);
}

#[test]
fn range_enumerates_row_major() {
    let cells: Vec<String> = enumerate(&parse_range("A1:B2").unwrap())
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
}

#[test]
fn sum_of_range() {
    let cells = sheet(&[("A1", "1"), ("A2", "2"), ("A3", "3")]);
    assert_eq!(evaluate("=SUM(A1:A3)", &cells), EvalResult::Number(6.0));
}

#[test]
fn average_of_empty_range_is_zero() {
    assert_eq!(evaluate("=AVERAGE(B1:B5)", &sheet(&[])), EvalResult::Number(0.0));
}

#[test]
fn text_cells_are_skipped_by_aggregates() {
    let cells = sheet(&[("A1", "1"), ("A2", "x"), ("A3", "3")]);
    assert_eq!(evaluate("=SUM(A1:A3)", &cells), EvalResult::Number(4.0));
    assert_eq!(evaluate("=COUNT(A1:A3)", &cells), EvalResult::Number(2.0));
}

#[test]
fn if_picks_branch() {
    let cells = sheet(&[]);
    assert_eq!(
        evaluate("=IF(1,\"High\",\"Low\")", &cells).to_string(),
        "High"
    );
    assert_eq!(
        evaluate("=IF(0,\"High\",\"Low\")", &cells).to_string(),
        "Low"
    );
}

#[test]
fn function_result_feeds_arithmetic() {
    let cells = sheet(&[("A1", "5"), ("A2", "5")]);
    assert_eq!(evaluate("=SUM(A1:A2)+10", &cells).to_string(), "20");
}

#[test]
fn failures_collapse_to_sentinel() {
    let cells = sheet(&[]);
    assert_eq!(evaluate("=FOO(A1)", &cells).to_string(), "#ERROR!");
    assert_eq!(evaluate("=SUM(", &cells).to_string(), "#ERROR!");
    assert_eq!(evaluate("=1/0", &cells).to_string(), "#ERROR!");
    assert_eq!(evaluate("=SUM(MAX(A1:A2))", &cells).to_string(), "#ERROR!");
}

#[test]
fn reversed_range_sums_to_zero() {
    let cells = sheet(&[("A1", "1"), ("A2", "2"), ("A3", "3")]);
    assert_eq!(evaluate("=SUM(A3:A1)", &cells), EvalResult::Number(0.0));
}

#[test]
fn limits_are_enforced() {
    let cells = sheet(&[]);
    let options = EvalOptions::default();

    let long = format!("={}", "1+".repeat(5000) + "1");
    assert!(long.len() > options.max_formula_len);
    assert!(evaluate(&long, &cells).is_error());

    let deep = format!("={}1{}", "(".repeat(65), ")".repeat(65));
    assert!(evaluate(&deep, &cells).is_error());
    let shallow = format!("={}1{}", "(".repeat(64), ")".repeat(64));
    assert_eq!(evaluate(&shallow, &cells), EvalResult::Number(1.0));

    assert!(evaluate("=SUM(A1:ZZ10000)", &cells).is_error());
    let relaxed = EvalOptions {
        max_range_cells: 10_000_000,
        ..EvalOptions::default()
    };
    assert_eq!(
        evaluate_with("=COUNT(A1:Z1000)", &cells, &relaxed),
        EvalResult::Number(0.0)
    );
}

#[test]
fn repeated_evaluation_is_stable() {
    let cells = sheet(&[("A1", "2"), ("B1", "3"), ("C1", "word")]);
    for formula in ["=A1*B1", "=CONCATENATE(A1:C1)", "=MAX(A1:C1)-MIN(A1:C1)", "=C1&A1"] {
        assert_eq!(evaluate(formula, &cells), evaluate(formula, &cells));
    }
}
