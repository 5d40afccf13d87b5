//! Error types for the typedcsv conversion pipeline.
//!
//! - [`DecodeError`] - scalar cell decoding errors
//! - [`ArrayError`] - array cell errors (swallowed to `[]`, only reported)
//! - [`AssembleError`] - record and document assembly errors
//! - [`CsvError`] - table reading errors
//! - [`ConfigError`] - batch configuration errors
//! - [`ConvertError`] - top-level conversion errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Decoding Errors
// =============================================================================

/// Errors while decoding one scalar cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Cell is not a valid base-10 integer (or does not fit in 64 bits).
    #[error("invalid literal for int: '{0}'")]
    InvalidInt(String),

    /// Cell is not a valid floating-point literal.
    #[error("could not convert string to float: '{0}'")]
    InvalidFloat(String),
}

/// Why an array cell fell back to an empty array.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrayError {
    /// The cell is not a literal the restricted parser accepts.
    #[error("malformed literal at offset {offset}: {message}")]
    Literal { offset: usize, message: String },

    /// The literal parsed but cannot be iterated (number, bool, None).
    #[error("{0} literal is not a sequence")]
    NotIterable(&'static str),

    /// One element could not be coerced to the column's element type.
    #[error("element {index} ('{element}') cannot be converted to {target}")]
    Coercion {
        index: usize,
        element: String,
        target: &'static str,
    },
}

// =============================================================================
// Assembly Errors
// =============================================================================

/// Errors while zipping rows into records and records into a document.
///
/// Row numbers are 1-based and count data rows only.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The header row has no column named `id`.
    #[error("header row has no 'id' column")]
    MissingIdColumn,

    /// The row ends before the `id` column.
    #[error("data row {row} has no value for 'id'")]
    MissingId { row: usize },

    /// The row has more cells than the header or schema row.
    #[error("data row {row} has {len} cells but only {columns} columns are declared")]
    RowTooLong {
        row: usize,
        len: usize,
        columns: usize,
    },

    /// The `id` column decoded to an array, which cannot key a document.
    #[error("data row {row}: array-typed 'id' cannot be used as a document key")]
    UnhashableId { row: usize },

    /// A scalar cell failed to decode.
    #[error("data row {row}, column '{column}' (value '{value}'): {source}")]
    Cell {
        row: usize,
        column: String,
        value: String,
        #[source]
        source: DecodeError,
    },
}

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading a typed table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid CSV structure (unterminated quote, bad record).
    #[error("Invalid CSV format at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// No rows at all.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row present but no type-schema row.
    #[error("CSV file has a header row but no type-schema row")]
    MissingSchemaRow,
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building a batch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Manifest could not be read.
    #[error("Cannot read manifest '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON for a batch configuration.
    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing to convert.
    #[error("No input files given (pass inputs, --manifest, or set TYPEDCSV_INPUTS)")]
    NoInputs,

    /// Delimiter is not a single ASCII character.
    #[error("Invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion error.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_file`]
/// and [`crate::transform::pipeline::run_batch`]. File-scoped variants name the
/// file that was being converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input table could not be read.
    #[error("{path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    /// Rows could not be assembled into a document.
    #[error("{path}: {source}")]
    Assemble {
        path: PathBuf,
        #[source]
        source: AssembleError,
    },

    /// Output file could not be written.
    #[error("Cannot write '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for cell decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for document assembly.
pub type AssembleResult<T> = Result<T, AssembleError>;

/// Result type for table reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;
