//! sheetcalc - spreadsheet formula engine, command mode host

mod config;

use anyhow::{Context, Result, bail};
use sheetcalc_core::{Address, Sheet};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: sheetcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --csv <FILE>              Load cells from a CSV file");
    eprintln!("  -s, --set <ADDR=INPUT>    Commit a cell, e.g. A1=5 or B1==SUM(A1:A3) (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print the result (can be repeated)");
    eprintln!("  -o, --output <FILE>       Export the sheet to CSV");
    eprintln!("  --config <FILE>           Load settings from this TOML file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set SHEETCALC_LOG (e.g. SHEETCALC_LOG=debug) to control logging on stderr.");
}

#[derive(Debug, Default)]
struct Args {
    csv_file: Option<PathBuf>,
    sets: Vec<(Address, String)>,
    commands: Vec<String>,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    help: bool,
}

fn parse_set(arg: &str) -> Result<(Address, String)> {
    let Some((addr, input)) = arg.split_once('=') else {
        bail!("--set expects ADDR=INPUT, got {:?}", arg);
    };
    let addr: Address = addr
        .trim()
        .parse()
        .with_context(|| format!("--set {:?}", arg))?;
    Ok((addr, input.to_string()))
}

/// Advance past a flag and return its value.
fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => bail!("{} requires a value", flag),
    }
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => parsed.help = true,
            "--csv" => parsed.csv_file = Some(PathBuf::from(flag_value(args, &mut i)?)),
            "-s" | "--set" => {
                let set = parse_set(flag_value(args, &mut i)?)?;
                parsed.sets.push(set);
            }
            "-c" | "--command" => parsed.commands.push(flag_value(args, &mut i)?.to_string()),
            "-o" | "--output" => parsed.output_file = Some(PathBuf::from(flag_value(args, &mut i)?)),
            "--config" => parsed.config_file = Some(PathBuf::from(flag_value(args, &mut i)?)),
            other => bail!("Unknown option: {}", other),
        }
        i += 1;
    }

    Ok(parsed)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SHEETCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let (config, warnings) = config::load_config(args.config_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut sheet = Sheet::with_options(config.eval);

    if let Some(path) = &args.csv_file {
        let count = sheet
            .import_csv_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::info!(cells = count, path = %path.display(), "loaded CSV");
    }

    for (addr, input) in &args.sets {
        sheet.set_cell(*addr, input);
    }

    for formula in &args.commands {
        println!("{}", sheet.evaluate(formula));
    }

    if let Some(path) = &args.output_file {
        sheet
            .export_csv_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn main() {
    init_logging();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if args.help {
        print_usage();
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
