//! Version data files
//!
//! Each file holds one version's tables:
//!
//! ```yaml
//! version: "1.6.1"
//! tables:
//!   sgetrf:
//!     - [100, 100, 1.2, 0.001, 3.4, 0.0002, 1.0e-16]
//!     - [200, 200, .nan, .nan, 9.1, 0.0006, 2.0e-16]
//! ```
//!
//! JSON has no NaN literal, so `null` cells load as NaN in every format.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::DataError;
use crate::table::ResultTable;
use crate::version::{Version, VersionSet};

/// On-disk encoding of a version file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    version: String,
    #[serde(default)]
    tables: IndexMap<String, Vec<Vec<Option<f64>>>>,
}

/// Parse one version from text
///
/// # Errors
/// Returns a format error for malformed input, or [`DataError::Table`] for a
/// ragged table.
pub fn parse_version(text: &str, format: DataFormat) -> Result<Version, DataError> {
    let file: VersionFile = match format {
        DataFormat::Json => serde_json::from_str(text)?,
        DataFormat::Yaml => serde_yaml::from_str(text)?,
        DataFormat::Toml => toml::from_str(text)?,
    };

    let mut version = Version::new(file.version);
    for (name, rows) in file.tables {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.unwrap_or(f64::NAN)).collect::<Vec<_>>());
        let table = ResultTable::from_rows(rows).map_err(|source| DataError::Table {
            version: version.name().to_string(),
            table: name.clone(),
            source,
        })?;
        debug!(
            version = version.name(),
            table = %name,
            rows = table.rows(),
            "loaded table"
        );
        version.insert_table(name, table);
    }
    Ok(version)
}

/// Load one version file, format chosen by extension
///
/// # Errors
/// Returns [`DataError::UnsupportedFormat`] for unknown extensions, plus any
/// I/O or parse error.
pub fn load_version(path: &Path) -> Result<Version, DataError> {
    let format =
        DataFormat::from_path(path).ok_or_else(|| DataError::UnsupportedFormat(path.into()))?;
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    parse_version(&text, format)
}

/// Load every version file in `dir`
///
/// With an empty `order`, versions are sorted by file name. Otherwise only the
/// named versions are kept, in the given order.
///
/// # Errors
/// Returns [`DataError::UnknownVersion`] when `order` names a version no file
/// declares, [`DataError::DuplicateVersion`] when two files declare the same
/// name or `order` lists one twice, and any I/O or parse error.
pub fn load_dir(dir: &Path, order: &[String]) -> Result<VersionSet, DataError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| DataError::io(dir, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut loaded = Vec::new();
    let mut seen = HashSet::new();
    for path in paths {
        if DataFormat::from_path(&path).is_none() {
            debug!(path = %path.display(), "skipping non-data file");
            continue;
        }
        let version = load_version(&path)?;
        if !seen.insert(version.name().to_string()) {
            return Err(DataError::DuplicateVersion(version.name().to_string()));
        }
        loaded.push(version);
    }

    if order.is_empty() {
        return Ok(VersionSet::new(loaded));
    }

    let mut listed = HashSet::new();
    if let Some(name) = order.iter().find(|name| !listed.insert(name.as_str())) {
        return Err(DataError::DuplicateVersion(name.clone()));
    }

    let mut ordered = Vec::with_capacity(order.len());
    for name in order {
        let idx = loaded
            .iter()
            .position(|v| v.name() == name)
            .ok_or_else(|| DataError::UnknownVersion(name.clone()))?;
        ordered.push(loaded.swap_remove(idx));
    }
    for dropped in &loaded {
        warn!(version = dropped.name(), "version not listed in ordering, ignored");
    }
    Ok(VersionSet::new(ordered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.json")), Some(DataFormat::Json));
        assert_eq!(DataFormat::from_path(Path::new("a.YML")), Some(DataFormat::Yaml));
        assert_eq!(DataFormat::from_path(Path::new("a.toml")), Some(DataFormat::Toml));
        assert_eq!(DataFormat::from_path(Path::new("a.py")), None);
        assert_eq!(DataFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn json_null_becomes_nan() {
        let v = parse_version(
            r#"{"version": "1.6.0", "tables": {"ssyevd_JN": [[100, null, 0.01, 1e-15]]}}"#,
            DataFormat::Json,
        )
        .unwrap();
        let t = v.table("ssyevd_JN").unwrap();
        assert!(t.get(0, 1).unwrap().is_nan());
        assert_eq!(t.get(0, 2), Some(0.01));
    }

    #[test]
    fn yaml_nan_literal() {
        let v = parse_version(
            "version: trunk\ntables:\n  dgeev_RN:\n    - [10, .nan, 0.5, 0.0]\n",
            DataFormat::Yaml,
        )
        .unwrap();
        assert_eq!(v.name(), "trunk");
        assert!(v.table("dgeev_RN").unwrap().get(0, 1).unwrap().is_nan());
    }

    #[test]
    fn toml_tables() {
        let v = parse_version(
            "version = \"1.5.0\"\n[tables]\nspotrf = [[10.0, 1.0, 0.1, 2.0, 0.05, 0.0]]\n",
            DataFormat::Toml,
        )
        .unwrap();
        assert_eq!(v.table("spotrf").unwrap().columns(), 6);
    }

    #[test]
    fn ragged_table_names_table() {
        let err = parse_version(
            r#"{"version": "v", "tables": {"sgetrf": [[1, 2], [3]]}}"#,
            DataFormat::Json,
        )
        .unwrap_err();
        match err {
            DataError::Table { table, version, .. } => {
                assert_eq!(table, "sgetrf");
                assert_eq!(version, "v");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_tables_key_is_empty_version() {
        let v = parse_version(r#"{"version": "empty"}"#, DataFormat::Json).unwrap();
        assert_eq!(v.table_names().count(), 0);
    }
}
