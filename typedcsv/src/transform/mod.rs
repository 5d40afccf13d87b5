//! Transformation module.
//!
//! - Literal: restricted literal parser for array cells
//! - Decoder: schema tag to typed value
//! - Assembler: rows to keyed document
//! - Writer: pretty JSON output
//! - Pipeline: batch conversion of files

pub mod assembler;
pub mod decoder;
pub mod literal;
pub mod pipeline;
pub mod writer;

pub use assembler::{assemble, assemble_with_stats, AssembleStats, Assembled, RecordAssembler, ID_COLUMN};
pub use decoder::{decode, is_truthy, parse_float, parse_int, resolve_schema, ColumnType, ScalarType, TRUTHY};
pub use literal::{parse_literal, Literal};
pub use pipeline::{convert_file, load_document, run_batch, run_batch_with, ConversionReport};
pub use writer::{to_json_string, write_json_file, WriterOptions};
