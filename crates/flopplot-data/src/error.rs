//! Error types for result tables and data loading

use std::path::PathBuf;

/// Errors raised while building or indexing a [`ResultTable`](crate::ResultTable)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// A row does not have the same width as the first row
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Column index past the table width
    #[error("column {column} out of range for table with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// Table narrower than its layout requires
    #[error("table has {found} columns, layout needs at least {required}")]
    TooNarrow { required: usize, found: usize },
}

/// Errors raised while loading version data files
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Could not read a file or directory
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one of json, yaml, yml, toml
    #[error("unsupported data file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed TOML
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A table inside a version file is not rectangular
    #[error("table {table} in version {version}: {source}")]
    Table {
        version: String,
        table: String,
        #[source]
        source: TableError,
    },

    /// Ordering names a version that no file provides
    #[error("unknown version in ordering: {0}")]
    UnknownVersion(String),

    /// Two files declare the same version name, or the ordering repeats one
    #[error("version {0} declared more than once")]
    DuplicateVersion(String),
}

impl DataError {
    /// Attach a path to an I/O error
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
