//! Tested library versions and their result tables

use indexmap::IndexMap;

use crate::color::{rainbow_ramp, Rgb};
use crate::table::ResultTable;

/// Numeric precision of a routine, in BLAS/LAPACK prefix order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// `s`: single real
    Single,
    /// `d`: double real
    Double,
    /// `c`: single complex
    SingleComplex,
    /// `z`: double complex
    DoubleComplex,
}

impl Precision {
    /// All precisions in panel order
    pub const ALL: [Self; 4] = [
        Self::Single,
        Self::Double,
        Self::SingleComplex,
        Self::DoubleComplex,
    ];

    /// Routine name prefix
    #[inline]
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Single => 's',
            Self::Double => 'd',
            Self::SingleComplex => 'c',
            Self::DoubleComplex => 'z',
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::SingleComplex | Self::DoubleComplex)
    }

    /// 1-based position in a 2x2 panel grid
    #[inline]
    #[must_use]
    pub const fn panel(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::SingleComplex => 3,
            Self::DoubleComplex => 4,
        }
    }

    /// Routine name for this precision.
    ///
    /// `real` is used for `s`/`d`, `complex` for `c`/`z`, covering pairs like
    /// `syevd`/`heevd` and `symv`/`hemv`.
    #[must_use]
    pub fn routine(self, real: &str, complex: &str) -> String {
        let base = if self.is_complex() { complex } else { real };
        format!("{}{}", self.prefix(), base)
    }
}

/// One tested release
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    name: String,
    color: Rgb,
    tables: IndexMap<String, ResultTable>,
}

impl Version {
    /// New version with no tables; color is assigned by [`VersionSet`]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Rgb::BLACK,
            tables: IndexMap::new(),
        }
    }

    /// Builder-style table insertion
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: ResultTable) -> Self {
        self.insert_table(name, table);
        self
    }

    /// Insert or replace a table
    pub fn insert_table(&mut self, name: impl Into<String>, table: ResultTable) {
        self.tables.insert(name.into(), table);
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Table by routine name, `None` when this version did not benchmark it
    #[inline]
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&ResultTable> {
        self.tables.get(name)
    }

    #[inline]
    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in insertion order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// Versions ordered oldest to newest, each colored on the rainbow ramp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionSet {
    versions: Vec<Version>,
}

impl VersionSet {
    /// Order is taken as given: oldest first
    #[must_use]
    pub fn new(versions: Vec<Version>) -> Self {
        let mut versions = versions;
        let colors = rainbow_ramp(versions.len());
        for (v, color) in versions.iter_mut().zip(colors) {
            v.color = color;
        }
        Self { versions }
    }

    /// Subset by name, keeping this set's order and recoloring the result
    #[must_use]
    pub fn select(&self, names: &[&str]) -> Self {
        Self::new(
            self.versions
                .iter()
                .filter(|v| names.contains(&v.name()))
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Version> {
        self.versions.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Version> {
        self.versions.get(idx)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.versions.iter().map(Version::name).collect()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Version;
    type IntoIter = std::slice::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
