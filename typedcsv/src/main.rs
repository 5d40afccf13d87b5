//! typedcsv CLI - convert typed CSV tables to keyed JSON
//!
//! # Main Commands
//!
//! ```bash
//! typedcsv convert Player.csv Quest.csv    # Player.json, Quest.json
//! typedcsv convert --manifest batch.json   # Inputs and options from a manifest
//! typedcsv convert                         # Inputs from TYPEDCSV_INPUTS (.env honored)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! typedcsv decode 'array[int]' '[1, 2]'    # Decode one cell
//! typedcsv schema Player.csv               # Show resolved column types
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use typedcsv::logs::{log_error, set_quiet};
use typedcsv::{
    decode, read_table_file, resolve_schema, run_batch_with, to_json_string, BatchConfig,
    WriterOptions,
};

#[derive(Parser)]
#[command(name = "typedcsv")]
#[command(about = "Convert CSV tables with a type-schema row into keyed JSON documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert tables to JSON, one output per input
    Convert {
        /// Input CSV files (output: same name with .json)
        inputs: Vec<PathBuf>,

        /// JSON manifest listing inputs and options
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory for derived outputs (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Field delimiter: one character, "tab", or "auto"
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Write non-ASCII characters as-is instead of \uXXXX escapes
        #[arg(long)]
        no_ascii_escape: bool,

        /// Only print confirmations, warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Decode a single cell and print it as JSON
    Decode {
        /// Type tag (int, float, bool, array[int], ...)
        tag: String,

        /// Raw cell text
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Show the resolved type of every column of a table
    Schema {
        /// Input CSV file
        input: PathBuf,

        /// Field delimiter: one character, "tab", or "auto"
        #[arg(short, long)]
        delimiter: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            inputs,
            manifest,
            output_dir,
            delimiter,
            no_ascii_escape,
            quiet,
        } => cmd_convert(
            inputs,
            manifest.as_deref(),
            output_dir.as_deref(),
            delimiter.as_deref(),
            no_ascii_escape,
            quiet,
        ),

        Commands::Decode { tag, value } => cmd_decode(&tag, &value),

        Commands::Schema { input, delimiter } => cmd_schema(&input, delimiter.as_deref()),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: Vec<PathBuf>,
    manifest: Option<&Path>,
    output_dir: Option<&Path>,
    delimiter: Option<&str>,
    no_ascii_escape: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    set_quiet(quiet);

    let mut config = match manifest {
        Some(path) => {
            let mut config = BatchConfig::from_manifest(path)?;
            config
                .jobs
                .extend(BatchConfig::from_inputs(inputs, output_dir).jobs);
            config
        }
        None if !inputs.is_empty() => BatchConfig::from_inputs(inputs, output_dir),
        None => BatchConfig::from_env()?,
    };

    if let Some(choice) = delimiter {
        config.set_delimiter(choice)?;
    }
    if no_ascii_escape {
        config.writer.ensure_ascii = false;
    }

    run_batch_with(&config, |report| {
        println!(
            "Converted {} -> {}",
            report.input.display(),
            report.output.display()
        );
    })?;

    Ok(())
}

fn cmd_decode(tag: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let decoded = decode(value, tag)?;
    println!("{}", to_json_string(&decoded, &WriterOptions::default())?);
    Ok(())
}

fn cmd_schema(input: &Path, delimiter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BatchConfig::default();
    if let Some(choice) = delimiter {
        config.set_delimiter(choice)?;
    }
    let table = read_table_file(input, &config.reader)?;
    let columns = resolve_schema(&table.schema);

    eprintln!("📄 {}", input.display());
    eprintln!("   Encoding: {}", table.encoding);
    eprintln!("   Data rows: {}", table.rows.len());
    println!("📋 {} columns:", table.headers.len());
    for (i, name) in table.headers.iter().enumerate() {
        let tag = table.schema.get(i).map(String::as_str).unwrap_or("");
        match columns.get(i) {
            Some(column) if column.to_string() == tag => {
                println!("   [{:2}] {}: {}", i + 1, name, column);
            }
            Some(column) => println!("   [{:2}] {}: {} (tag '{}')", i + 1, name, column, tag),
            None => println!("   [{:2}] {}: (no type tag)", i + 1, name),
        }
    }
    if !table.headers.iter().any(|h| h == typedcsv::transform::ID_COLUMN) {
        eprintln!("   ⚠️  No 'id' column: conversion will fail");
    }

    Ok(())
}
