//! Record assembly: zip header, schema and data rows into a keyed document.
//!
//! ```text
//! headers  id   | name  | tags
//! schema   int  | str   | array[str]
//! row      7    | Ann   | ['a','b']     ->  "7": {"id": 7, "name": "Ann", "tags": ["a", "b"]}
//! ```
//!
//! Each record is keyed by its decoded `id`. A later record with the same
//! key replaces the earlier one. Any error aborts the whole assembly.

use serde::Serialize;

use super::decoder::{resolve_schema, ColumnType};
use crate::error::{AssembleError, AssembleResult};
use crate::logs::{log_warning, log_warning_indent};
use crate::models::{Document, Record};

/// Name of the column whose value keys the document.
pub const ID_COLUMN: &str = "id";

/// Counters collected while assembling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleStats {
    /// Data rows read
    pub rows: usize,
    /// Records in the document
    pub records: usize,
    /// Records replaced by a later row with the same id
    pub overwritten: usize,
    /// Array cells that decoded to `[]` because they could not be parsed
    pub array_fallbacks: usize,
}

/// A document and the counters collected while building it.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub document: Document,
    pub stats: AssembleStats,
}

/// Column names and resolved column types for one table.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    headers: Vec<String>,
    columns: Vec<ColumnType>,
}

impl RecordAssembler {
    /// Resolve the schema row. Fails if no header is named `id`.
    pub fn new<H: AsRef<str>, S: AsRef<str>>(headers: &[H], schema: &[S]) -> AssembleResult<Self> {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        if !headers.iter().any(|h| h == ID_COLUMN) {
            return Err(AssembleError::MissingIdColumn);
        }
        Ok(Self {
            headers,
            columns: resolve_schema(schema),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    /// Decode one data row. `row_number` is 1-based and used in errors.
    pub fn record<C: AsRef<str>>(&self, row_number: usize, row: &[C]) -> AssembleResult<Record> {
        let mut fallbacks = 0;
        self.decode_row(row_number, row, &mut fallbacks)
    }

    fn decode_row<C: AsRef<str>>(
        &self,
        row_number: usize,
        row: &[C],
        fallbacks: &mut usize,
    ) -> AssembleResult<Record> {
        let declared = self.headers.len().min(self.columns.len());
        if row.len() > declared {
            return Err(AssembleError::RowTooLong {
                row: row_number,
                len: row.len(),
                columns: declared,
            });
        }

        let mut record = Record::new();
        for ((name, column), cell) in self.headers.iter().zip(&self.columns).zip(row) {
            let raw = cell.as_ref();
            let value = column
                .decode_reporting(raw, |err| {
                    *fallbacks += 1;
                    log_warning_indent(
                        format!(
                            "row {}, column '{}': array cell {:?} decoded as [] ({})",
                            row_number, name, raw, err
                        ),
                        1,
                    );
                })
                .map_err(|source| AssembleError::Cell {
                    row: row_number,
                    column: name.clone(),
                    value: raw.to_string(),
                    source,
                })?;
            record.insert(name.as_str(), value);
        }
        Ok(record)
    }

    /// Decode all rows and fold them into a document keyed by `id`.
    pub fn assemble_rows<R, C>(&self, rows: &[R]) -> AssembleResult<Assembled>
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let mut document = Document::new();
        let mut stats = AssembleStats::default();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let record = self.decode_row(row_number, row.as_ref(), &mut stats.array_fallbacks)?;
            let key = record
                .get(ID_COLUMN)
                .ok_or(AssembleError::MissingId { row: row_number })?
                .to_key()
                .ok_or(AssembleError::UnhashableId { row: row_number })?;

            if document.insert(key.clone(), record) {
                stats.overwritten += 1;
                log_warning(format!("row {}: id '{}' replaces an earlier record", row_number, key));
            }
            stats.rows += 1;
        }

        stats.records = document.len();
        Ok(Assembled { document, stats })
    }
}

/// Assemble a document from header, schema and data rows.
///
/// # Example
/// ```
/// use typedcsv::assemble;
///
/// let doc = assemble(
///     &["id", "name"],
///     &["int", "str"],
///     &[vec!["1", "Alice"], vec!["2", "Bob"], vec!["1", "Carl"]],
/// )
/// .unwrap();
///
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.get("1").unwrap().get("name").unwrap().as_str(), Some("Carl"));
/// ```
pub fn assemble<H, S, R, C>(headers: &[H], schema: &[S], rows: &[R]) -> AssembleResult<Document>
where
    H: AsRef<str>,
    S: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    assemble_with_stats(headers, schema, rows).map(|assembled| assembled.document)
}

/// Same as [`assemble`], also returning assembly counters.
pub fn assemble_with_stats<H, S, R, C>(
    headers: &[H],
    schema: &[S],
    rows: &[R],
) -> AssembleResult<Assembled>
where
    H: AsRef<str>,
    S: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    RecordAssembler::new(headers, schema)?.assemble_rows(rows)
}
