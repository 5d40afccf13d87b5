//! # typedcsv - schema-driven CSV to JSON conversion
//!
//! typedcsv converts CSV tables carrying a type-schema row into JSON documents
//! keyed by each record's `id`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Assembler  │────▶│  JSON File  │
//! │ header+type │     │  (auto-enc) │     │  (decoder)  │     │  (by id)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ```text
//! id,score,tags                         {
//! int,float,array[str]          ──▶         "7": {"id": 7, "score": 3.5, "tags": ["a", "b"]}
//! 7,3.5,"['a','b']"                     }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use typedcsv::{run_batch, BatchConfig};
//!
//! let config = BatchConfig::from_inputs(["Player.csv"], None);
//! run_batch(&config).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Typed values, records, documents
//! - [`parser`] - CSV reading with encoding detection
//! - [`transform`] - Decoder, assembler, writer and batch pipeline
//! - [`config`] - Batch configuration
//! - [`logs`] - Log side-channel

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Configuration
pub mod config;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ArrayError, AssembleError, ConfigError, ConvertError, CsvError, DecodeError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Document, Record, TypedValue};

// =============================================================================
// Re-exports - Decoding and assembly
// =============================================================================

pub use transform::{
    assemble,
    assemble_with_stats,
    decode,
    resolve_schema,
    AssembleStats,
    Assembled,
    ColumnType,
    RecordAssembler,
    ScalarType,
};

// =============================================================================
// Re-exports - Reading and writing
// =============================================================================

pub use parser::{read_table_bytes, read_table_file, ReaderOptions, TypedTable};
pub use transform::{to_json_string, write_json_file, WriterOptions};

// =============================================================================
// Re-exports - Batch
// =============================================================================

pub use config::{BatchConfig, ConversionJob};
pub use transform::{convert_file, run_batch, run_batch_with, ConversionReport};
