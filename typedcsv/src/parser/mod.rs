//! Typed table reader with encoding detection.
//!
//! A typed table is a CSV file whose first row names the columns and whose
//! second row declares each column's type tag. Everything after that is data.
//! No decoding happens here: cells stay strings.
//!
//! Blank lines are not rows. They are dropped wherever they appear, so an
//! empty line between records or at the end of a file never reaches the
//! assembler as a record without an `id`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// How a table is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderOptions {
    /// Field delimiter
    pub delimiter: char,
    /// Pick the delimiter from the header line instead
    pub detect_delimiter: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            detect_delimiter: false,
        }
    }
}

/// Raw rows of a typed table with reading metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedTable {
    /// Row 0: column names
    pub headers: Vec<String>,
    /// Row 1: type tags
    pub schema: Vec<String>,
    /// Rows 2..N
    pub rows: Vec<Vec<String>>,
    /// Detected encoding
    pub encoding: String,
    /// Delimiter used
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as is; anything else goes through chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "" => "utf-8".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding label. A leading BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let content = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(format!("invalid UTF-8: {}", e)))?,
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            // Unknown label: lossy UTF-8
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Pick the delimiter occurring most often in the first line.
///
/// Falls back to `,` when none of the candidates appear.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a typed table from a file.
pub fn read_table_file<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> CsvResult<TypedTable> {
    let bytes = std::fs::read(path.as_ref())?;
    read_table_bytes(&bytes, options)
}

/// Read a typed table from raw bytes, detecting the encoding.
pub fn read_table_bytes(bytes: &[u8], options: &ReaderOptions) -> CsvResult<TypedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = if options.detect_delimiter {
        detect_delimiter(&content)
    } else {
        options.delimiter
    };
    read_table_str(&content, delimiter, encoding)
}

/// Split decoded text into header, schema and data rows.
///
/// Quoted fields may contain the delimiter and line breaks. Rows may differ
/// in length. Blank lines are skipped.
pub fn read_table_str(content: &str, delimiter: char, encoding: String) -> CsvResult<TypedTable> {
    if !delimiter.is_ascii() {
        return Err(CsvError::Parse {
            line: 0,
            message: format!("delimiter '{}' is not an ASCII character", delimiter),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| CsvError::Parse {
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut rows = rows.into_iter();
    let headers = rows.next().ok_or(CsvError::EmptyFile)?;
    let schema = rows.next().ok_or(CsvError::MissingSchemaRow)?;

    Ok(TypedTable {
        headers,
        schema,
        rows: rows.collect(),
        encoding,
        delimiter,
    })
}
