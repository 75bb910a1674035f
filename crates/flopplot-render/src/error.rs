//! Error types for flopplot rendering
//!
//! - Series format strings that fail to parse
//! - Invalid subplot selection
//! - Tables that do not fit their column layout
//! - Backend and file output failures
//! - Configuration loading

use std::path::PathBuf;

use flopplot_data::TableError;

/// Main error for plot construction
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Bad series format string
    #[error("invalid series format: {0}")]
    Style(#[from] StyleError),

    /// Bad subplot selection
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Table does not match its column layout
    #[error("table {table}: {source}")]
    Table {
        table: String,
        #[source]
        source: TableError,
    },

    /// SVD aspect ratio must be positive
    #[error("invalid M:N ratio {0}, must be positive and finite")]
    InvalidRatio(f64),
}

impl PlotError {
    #[inline]
    pub(crate) fn table(table: impl Into<String>, source: TableError) -> Self {
        Self::Table {
            table: table.into(),
            source,
        }
    }
}

/// Series format string errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// Character is not a marker, line style or color code
    #[error("unrecognized character {ch:?} in format {format:?}")]
    UnknownChar { ch: char, format: String },

    /// More than one marker, line style or color given
    #[error("format {format:?} specifies more than one {what}")]
    Duplicate { what: &'static str, format: String },
}

/// Subplot selection errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Grid with zero rows or columns
    #[error("subplot grid {rows}x{cols} is empty")]
    EmptyGrid { rows: usize, cols: usize },

    /// Index outside `1..=rows*cols`
    #[error("subplot index {index} outside 1..={max}")]
    IndexOutOfRange { index: usize, max: usize },
}

/// Chart output errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Could not create the output directory or file
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Drawing backend failure
    #[error("drawing failed: {0}")]
    Backend(String),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read config file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not toml, yaml, yml or json
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Malformed TOML
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed YAML
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Value out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}
