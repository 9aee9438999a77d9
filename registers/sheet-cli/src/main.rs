// Licensed under the Apache-2.0 license

//! Command-line front end: converts a register workbook into SystemRDL.

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use log::{debug, LevelFilter};
use mcu_registers_sheet::config::DEFAULT_OUTPUT;
use mcu_registers_sheet::{
    generate_rdl_file, EmitStats, ErrorKind, LogObserver, RegisterSpec, SheetConfig, SheetError,
    Workbook,
};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "sheet2rdl",
    author,
    version,
    about = "Convert a register workbook (Blocks, Registers, Fields sheets) into SystemRDL"
)]
struct Cli {
    /// Register workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
    #[arg(value_name = "WORKBOOK")]
    input: Option<PathBuf>,

    /// SystemRDL file to write
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Name of the sheet listing blocks
    #[arg(long, default_value = "Blocks")]
    blocks_sheet: String,

    /// Name of the sheet listing registers
    #[arg(long, default_value = "Registers")]
    registers_sheet: String,

    /// Name of the sheet listing fields
    #[arg(long, default_value = "Fields")]
    fields_sheet: String,

    /// Show debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }

    fn sheet_config(&self) -> SheetConfig {
        SheetConfig::with_defaults()
            .blocks_sheet(&self.blocks_sheet)
            .registers_sheet(&self.registers_sheet)
            .fields_sheet(&self.fields_sheet)
    }
}

/// Exit status for a missing workbook argument or a failed conversion.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = SimpleLogger::new()
        .with_level(cli.log_level())
        .without_timestamps()
        .init();
    ExitCode::from(run(&cli))
}

/// Runs one conversion and returns the process exit status.
fn run(cli: &Cli) -> u8 {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("  Spreadsheet to SystemRDL converter");
    println!("{rule}");

    let config = cli.sheet_config();
    let Some(input) = cli.input.as_deref() else {
        println!("{}", usage_message(&config));
        return EXIT_FAILURE;
    };

    let code = match convert(input, &cli.output, &config) {
        Ok(stats) => {
            println!();
            println!(
                "SystemRDL written to {} ({} blocks, {} registers, {} fields)",
                cli.output.display(),
                stats.blocks,
                stats.registers,
                stats.fields
            );
            println!();
            println!("Next steps:");
            println!("  1. Compile: peakrdl regblock {} -o output", cli.output.display());
            println!("  2. Generate HTML: peakrdl html {} -o output_html", cli.output.display());
            println!("  3. Open: output_html/index.html");
            0
        }
        Err(err) => {
            println!("{}", failure_message(&err, input, &config));
            EXIT_FAILURE
        }
    };

    println!();
    println!("{rule}");
    code
}

/// Loads the workbook and writes the SystemRDL output.
fn convert(input: &Path, output: &Path, config: &SheetConfig) -> Result<EmitStats> {
    println!("Reading workbook: {}", input.display());
    let workbook = Workbook::open(input)?;
    for table in workbook.tables() {
        debug!("Sheet '{}': {} rows", table.name(), table.len());
    }
    let spec = RegisterSpec::from_workbook(&workbook, config)?;
    println!("Blocks found: {}", spec.blocks.len());
    println!("Registers found: {}", spec.registers.len());
    println!("Fields found: {}", spec.fields.len());

    let stats = generate_rdl_file(&spec, output, &mut LogObserver)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(stats)
}

/// Describes a failure in one of three forms: missing file, missing sheet or
/// column, or anything else with its full error chain.
fn failure_message(err: &anyhow::Error, input: &Path, config: &SheetConfig) -> String {
    let sheet_err = err.downcast_ref::<SheetError>();
    match sheet_err.map(SheetError::kind) {
        Some(ErrorKind::NotFound) => format!(
            "Error: could not find file {}\n   Check that the file exists and the path is correct",
            input.display()
        ),
        Some(ErrorKind::MissingStructure) => {
            let key = sheet_err.and_then(SheetError::missing_key).unwrap_or("?");
            format!(
                "Error: expected sheet or column not found: '{key}'\n   {err}\n   Hint: {}",
                config.layout_hint()
            )
        }
        _ => format!("Error while processing the file: {err}\n{err:?}"),
    }
}

fn usage_message(config: &SheetConfig) -> String {
    format!(
        "\n{}\n\nExample:\n  sheet2rdl register_spec.xlsx output.rdl\n\nRequired workbook layout:\n  {}",
        Cli::command().render_usage(),
        config.layout_hint()
    )
}
