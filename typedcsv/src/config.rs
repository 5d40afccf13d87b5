//! Batch configuration: which tables to convert and how.
//!
//! A [`BatchConfig`] is an ordered list of input/output pairs plus reading
//! and writing options. It can be built from:
//!
//! - CLI arguments ([`BatchConfig::from_inputs`])
//! - a JSON manifest ([`BatchConfig::from_manifest`])
//! - environment variables, `.env` honored ([`BatchConfig::from_env`])
//!
//! ```json
//! {
//!     "inputs": ["Player.csv", "Quest.csv"],
//!     "outputDir": "build",
//!     "jobs": [{ "input": "shop/Purchasable.csv", "output": "build/shop.json" }],
//!     "reader": { "delimiter": "," },
//!     "writer": { "ensureAscii": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::parser::ReaderOptions;
use crate::transform::writer::WriterOptions;

/// Comma-separated input tables.
pub const ENV_INPUTS: &str = "TYPEDCSV_INPUTS";
/// Directory for outputs derived from inputs.
pub const ENV_OUTPUT_DIR: &str = "TYPEDCSV_OUTPUT_DIR";
/// Delimiter: a single character, `tab`, or `auto`.
pub const ENV_DELIMITER: &str = "TYPEDCSV_DELIMITER";

/// One table to convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Derive the output by replacing the input's extension with `.json`,
    /// placed in `output_dir` when given.
    pub fn for_input(input: impl Into<PathBuf>, output_dir: Option<&Path>) -> Self {
        let input = input.into();
        let derived = input.with_extension("json");
        let output = match (output_dir, derived.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => derived,
        };
        Self { input, output }
    }
}

/// Everything the batch driver needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchConfig {
    /// Tables to convert, in order
    pub jobs: Vec<ConversionJob>,
    pub reader: ReaderOptions,
    pub writer: WriterOptions,
}

/// On-disk manifest layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Manifest {
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    jobs: Vec<ConversionJob>,
    reader: ReaderOptions,
    writer: WriterOptions,
}

impl BatchConfig {
    /// Jobs for the given inputs, outputs derived from each input name.
    pub fn from_inputs<I, P>(inputs: I, output_dir: Option<&Path>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            jobs: inputs
                .into_iter()
                .map(|input| ConversionJob::for_input(input, output_dir))
                .collect(),
            ..Self::default()
        }
    }

    /// Load a JSON manifest. `inputs` come first, then explicit `jobs`.
    pub fn from_manifest(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_manifest_str(&content)
    }

    pub fn from_manifest_str(content: &str) -> ConfigResult<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        let mut config = Self::from_inputs(manifest.inputs, manifest.output_dir.as_deref());
        config.jobs.extend(manifest.jobs);
        config.reader = manifest.reader;
        config.writer = manifest.writer;
        Ok(config)
    }

    /// Build from `TYPEDCSV_*` environment variables, loading `.env` first.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let inputs: Vec<String> = env::var(ENV_INPUTS)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }

        let output_dir = env::var(ENV_OUTPUT_DIR).ok().map(PathBuf::from);
        let mut config = Self::from_inputs(inputs, output_dir.as_deref());
        if let Ok(delimiter) = env::var(ENV_DELIMITER) {
            config.set_delimiter(&delimiter)?;
        }
        Ok(config)
    }

    /// Set the delimiter from user text: one ASCII character, `tab`, `\t`,
    /// or `auto` to detect it from the header line.
    pub fn set_delimiter(&mut self, value: &str) -> ConfigResult<()> {
        match value {
            "auto" => self.reader.detect_delimiter = true,
            "tab" | "\\t" => {
                self.reader.delimiter = '\t';
                self.reader.detect_delimiter = false;
            }
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => {
                        self.reader.delimiter = c;
                        self.reader.detect_delimiter = false;
                    }
                    _ => return Err(ConfigError::InvalidDelimiter(value.to_string())),
                }
            }
        }
        Ok(())
    }

    /// Fails with [`ConfigError::NoInputs`] when there is nothing to do.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.jobs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        Ok(())
    }
}
