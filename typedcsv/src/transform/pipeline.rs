//! Batch conversion: typed CSV tables in, keyed JSON documents out.
//!
//! For each job of a [`BatchConfig`], in order:
//! 1. Read the table (encoding detection, delimiter)
//! 2. Resolve the schema row and assemble the document
//! 3. Write the document as pretty JSON
//!
//! The first failure aborts the batch; jobs after it are not attempted. An
//! output file is only created once its document has been assembled.
//!
//! # Example
//!
//! ```rust,no_run
//! use typedcsv::{run_batch, BatchConfig};
//!
//! let config = BatchConfig::from_inputs(["Player.csv", "Quest.csv"], None);
//! for report in run_batch(&config).unwrap() {
//!     println!("Converted {} -> {}", report.input.display(), report.output.display());
//! }
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::assembler::{AssembleStats, RecordAssembler};
use super::writer::{write_json_file, WriterOptions};
use crate::config::{BatchConfig, ConversionJob};
use crate::error::{ConvertError, ConvertResult};
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::Document;
use crate::parser::{read_table_file, ReaderOptions, TypedTable};

/// What one conversion did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: String,
    pub delimiter: char,
    pub columns: usize,
    pub stats: AssembleStats,
}

/// Read a table and assemble its document without writing anything.
pub fn load_document(path: &Path, reader: &ReaderOptions) -> ConvertResult<(TypedTable, Document, AssembleStats)> {
    let table = read_table_file(path, reader).map_err(|source| ConvertError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let assembled = RecordAssembler::new(&table.headers, &table.schema)
        .and_then(|assembler| assembler.assemble_rows(&table.rows))
        .map_err(|source| ConvertError::Assemble {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((table, assembled.document, assembled.stats))
}

/// Convert one table.
pub fn convert_file(
    job: &ConversionJob,
    reader: &ReaderOptions,
    writer: &WriterOptions,
) -> ConvertResult<ConversionReport> {
    log_info(format!("📖 Reading {}", job.input.display()));
    let (table, document, stats) = load_document(&job.input, reader)?;
    log_info_indent(
        format!(
            "{} columns, {} data rows (encoding {}, delimiter {})",
            table.headers.len(),
            table.rows.len(),
            table.encoding,
            format_delimiter(table.delimiter)
        ),
        1,
    );

    write_json_file(&job.output, &document, writer)?;
    log_success(format!(
        "{} records written to {}",
        stats.records,
        job.output.display()
    ));

    Ok(ConversionReport {
        input: job.input.clone(),
        output: job.output.clone(),
        encoding: table.encoding,
        delimiter: table.delimiter,
        columns: table.headers.len(),
        stats,
    })
}

/// Convert every job in order, calling `on_converted` after each one.
pub fn run_batch_with(
    config: &BatchConfig,
    mut on_converted: impl FnMut(&ConversionReport),
) -> ConvertResult<Vec<ConversionReport>> {
    config.validate()?;

    let mut reports = Vec::with_capacity(config.jobs.len());
    for job in &config.jobs {
        let report = convert_file(job, &config.reader, &config.writer)?;
        on_converted(&report);
        reports.push(report);
    }
    Ok(reports)
}

/// Convert every job in order.
pub fn run_batch(config: &BatchConfig) -> ConvertResult<Vec<ConversionReport>> {
    run_batch_with(config, |_| {})
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => format!("'{}'", c),
    }
}
