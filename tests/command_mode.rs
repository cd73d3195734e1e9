//! Integration tests for command mode (-c/--command and friends)

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sheetcalc"))
        // Tests must be deterministic and not depend on a user's ~/.config/sheetcalc/config.toml.
        .arg("--config")
        .arg(empty_config())
        .args(args)
        .env_remove("SHEETCALC_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sheetcalc-cli-{}-{}", std::process::id(), name))
}

fn empty_config() -> PathBuf {
    let path = temp_path("empty-config.toml");
    fs::write(&path, "").unwrap();
    path
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_leading_equals_is_optional() {
    let (stdout1, _, _) = run_command(&["-c", "10 + 5"]);
    let (stdout2, _, _) = run_command(&["-c", "=10 + 5"]);
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_set_then_command() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1=5", "-s", "A2=5", "-s", "A3==SUM(A1:A2)", "-c", "=A3+10", "-c", "=IF(1,\"High\",\"Low\")",
    ]);
    assert_eq!(stdout, "20\nHigh\n");
    assert_eq!(code, 0);
}

#[test]
fn test_evaluation_error_keeps_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "=FOO(A1)", "-c", "1/0"]);
    assert_eq!(stdout, "#ERROR!\n#ERROR!\n");
    assert_eq!(code, 0);
}

#[test]
fn test_unknown_option_fails() {
    let (_, stderr, code) = run_command(&["--bogus"]);
    assert!(stderr.contains("Unknown option: --bogus"));
    assert_eq!(code, 1);
}

#[test]
fn test_bad_set_address_fails() {
    let (_, stderr, code) = run_command(&["-s", "1A=3"]);
    assert!(stderr.contains("Error:"));
    assert_eq!(code, 1);
}

#[test]
fn test_missing_csv_fails() {
    let missing = temp_path("missing.csv");
    let (_, stderr, code) = run_command(&["--csv", missing.to_str().unwrap()]);
    assert!(stderr.contains("Failed to load"));
    assert_eq!(code, 1);
}

#[test]
fn test_csv_in_and_out() {
    let input = temp_path("in.csv");
    let output = temp_path("out.csv");
    fs::write(&input, "label,1\nother,2\n").unwrap();

    let (stdout, stderr, code) = run_command(&[
        "--csv",
        input.to_str().unwrap(),
        "-s",
        "B3==SUM(B1:B2)",
        "-c",
        "=COUNT(A1:B2)",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "{}", stderr);
    assert_eq!(stdout.trim(), "2");
    assert!(stderr.contains("Exported to"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "label,1\nother,2\n,3\n");

    fs::remove_file(input).ok();
    fs::remove_file(output).ok();
}

#[test]
fn test_config_enables_nested_calls() {
    let config = temp_path("nested.toml");
    fs::write(&config, "[eval]\nnested_calls = true\n").unwrap();

    let (stdout, _, code) = run_command(&[
        "--config",
        config.to_str().unwrap(),
        "-c",
        "=SUM(MAX(1, 4), 2)",
    ]);
    assert_eq!(stdout.trim(), "6");
    assert_eq!(code, 0);

    let (stdout, _, _) = run_command(&["-c", "=SUM(MAX(1, 4), 2)"]);
    assert_eq!(stdout.trim(), "#ERROR!");

    fs::remove_file(config).ok();
}

#[test]
fn test_help() {
    let (_, stderr, code) = run_command(&["-h"]);
    assert!(stderr.contains("Usage: sheetcalc"));
    assert_eq!(code, 0);
}
