//! Pretty JSON output for documents.
//!
//! Output uses a configurable indent (4 spaces by default), `": "` between
//! keys and values, and no trailing newline. With `ensure_ascii` every
//! non-ASCII character is written as a `\uXXXX` escape (surrogate pairs above
//! the BMP), so output is plain ASCII whatever the input encoding was.

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

/// How documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    /// Spaces per nesting level
    pub indent: usize,
    /// Escape non-ASCII characters
    pub ensure_ascii: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            ensure_ascii: true,
        }
    }
}

/// Pretty formatter with optional ASCII escaping of string contents.
struct DocumentFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    ensure_ascii: bool,
}

impl<'a> Formatter for DocumentFormatter<'a> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if !self.ensure_ascii || fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize a value as pretty JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, options: &WriterOptions) -> serde_json::Result<String> {
    let indent = b" ".repeat(options.indent);
    let formatter = DocumentFormatter {
        pretty: PrettyFormatter::with_indent(&indent),
        ensure_ascii: options.ensure_ascii,
    };

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e))
}

/// Serialize a value and write it to `path`, replacing any existing file.
pub fn write_json_file<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    options: &WriterOptions,
) -> ConvertResult<()> {
    let json = to_json_string(value, options)?;
    std::fs::write(path, json).map_err(|source| ConvertError::Output {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::assembler::assemble;

    #[test]
    fn test_four_space_layout() {
        let doc = assemble(
            &["id", "score", "tags"],
            &["int", "float", "array[str]"],
            &[vec!["7", "3.5", "['a','b']"]],
        )
        .unwrap();

        let json = to_json_string(&doc, &WriterOptions::default()).unwrap();
        let expected = "{\n    \"7\": {\n        \"id\": 7,\n        \"score\": 3.5,\n        \"tags\": [\n            \"a\",\n            \"b\"\n        ]\n    }\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_ascii_escaping() {
        let value = serde_json::json!({"name": "Zoë 🎮", "plain": "ok"});

        let escaped = to_json_string(&value, &WriterOptions::default()).unwrap();
        assert!(escaped.contains(r#""Zo\u00eb \ud83c\udfae""#));
        assert!(escaped.is_ascii());

        let options = WriterOptions { ensure_ascii: false, ..WriterOptions::default() };
        let raw = to_json_string(&value, &options).unwrap();
        assert!(raw.contains("\"Zoë 🎮\""));
    }

    #[test]
    fn test_empty_containers_and_control_chars() {
        let doc = assemble(&["id", "tags"], &["str", "array[int]"], &[vec!["a\tb", "[]"]]).unwrap();
        let json = to_json_string(&doc, &WriterOptions::default()).unwrap();
        assert!(json.contains(r#""a\tb": {"#));
        assert!(json.contains(r#""tags": []"#));

        let empty = assemble(&["id"], &["int"], &Vec::<Vec<&str>>::new()).unwrap();
        assert_eq!(to_json_string(&empty, &WriterOptions::default()).unwrap(), "{}");
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        let doc = assemble(&["id", "x"], &["int", "float"], &[vec!["1", "nan"]]).unwrap();
        let json = to_json_string(&doc, &WriterOptions { indent: 0, ..WriterOptions::default() }).unwrap();
        assert!(json.contains(r#""x": null"#));
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_file(&path, &serde_json::json!({"a": 1}), &WriterOptions::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n    \"a\": 1\n}");

        let missing = dir.path().join("no/such/dir/out.json");
        let err = write_json_file(&missing, &serde_json::json!({}), &WriterOptions::default());
        assert!(matches!(err, Err(ConvertError::Output { .. })));
    }
}
