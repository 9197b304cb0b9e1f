//! tapeir_options: tapeir.json parsing and output options.
//!
//! A project file lists the IR sources to lex and how to report the
//! resulting tokens. Command-line flags override anything set here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tapeir_printer::PrinterOptions;
use thiserror::Error;

/// The default project file name.
pub const CONFIG_FILE_NAME: &str = "tapeir.json";

/// How tokens are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `line:col  name [value]` row per token.
    #[default]
    Text,
    /// A JSON array with the tokens of every file.
    Json,
    /// Canonical IR text.
    Ir,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "ir" => Ok(OutputFormat::Ir),
            other => Err(format!("unknown output format '{}' (expected text, json or ir)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ir => write!(f, "ir"),
        }
    }
}

/// Output options, matching the `output` object of tapeir.json.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub format: Option<OutputFormat>,
    /// Line width for `ir` output.
    pub max_line_width: Option<usize>,
    /// Whether `ir` output ends with a newline.
    pub trailing_newline: Option<bool>,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Printer options for `ir` output.
    pub fn printer_options(&self) -> PrinterOptions {
        let defaults = PrinterOptions::default();
        PrinterOptions {
            max_line_width: self.max_line_width.or(defaults.max_line_width),
            trailing_newline: self.trailing_newline.unwrap_or(defaults.trailing_newline),
            ..defaults
        }
    }
}

/// The tapeir.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TapeirConfig {
    /// Source files, relative to the directory holding the config file.
    pub files: Option<Vec<String>>,
    pub output: Option<OutputOptions>,
}

impl TapeirConfig {
    pub fn output(&self) -> OutputOptions {
        self.output.clone().unwrap_or_default()
    }

    /// Source files resolved against `root_dir`.
    pub fn resolved_files(&self, root_dir: &Path) -> Vec<String> {
        self.files
            .iter()
            .flatten()
            .map(|f| root_dir.join(f).to_string_lossy().to_string())
            .collect()
    }
}

/// Errors reading a project file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a tapeir.json file from a string.
pub fn parse_config(content: &str) -> Result<TapeirConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a tapeir.json file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<TapeirConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// The contents written by `tapeir-lex --init`.
pub fn default_config_json() -> String {
    let config = TapeirConfig {
        files: Some(vec!["main.bfir".to_string()]),
        output: Some(OutputOptions {
            format: Some(OutputFormat::Text),
            max_line_width: Some(80),
            trailing_newline: Some(true),
        }),
    };
    let mut json = serde_json::to_string_pretty(&config).unwrap_or_default();
    json.push('\n');
    json
}
