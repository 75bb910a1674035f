//! Rectangular result tables

use crate::error::TableError;

/// One benchmark result table: a row per problem size, fixed column layout
///
/// Stored row-major. Missing measurements are kept as NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: usize,
    data: Vec<f64>,
}

impl ResultTable {
    /// Build from rows, rejecting ragged input
    ///
    /// # Errors
    /// Returns [`TableError::Ragged`] if any row differs in width from the first.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut columns = None;
        let mut data = Vec::new();

        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            let expected = *columns.get_or_insert(values.len());
            if values.len() != expected {
                return Err(TableError::Ragged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            columns: columns.unwrap_or(0),
            data,
        })
    }

    /// Number of rows (problem sizes)
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.data.len() / self.columns
        }
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row slice by index
    #[inline]
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        let start = idx.checked_mul(self.columns)?;
        self.data.get(start..start + self.columns).filter(|_| self.columns > 0)
    }

    /// Iterate rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.columns.max(1)).take(self.rows())
    }

    /// Single cell
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.columns {
            return None;
        }
        self.row(row).map(|r| r[col])
    }

    /// Copy out one column
    ///
    /// # Errors
    /// Returns [`TableError::ColumnOutOfRange`] if `col` is past the table width.
    pub fn column(&self, col: usize) -> Result<Vec<f64>, TableError> {
        self.check_column(col)?;
        Ok(self.iter_rows().map(|r| r[col]).collect())
    }

    /// Keep only rows matching `pred`
    #[must_use]
    pub fn select_rows<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&[f64]) -> bool,
    {
        let mut data = Vec::new();
        for row in self.iter_rows().filter(|r| pred(r)) {
            data.extend_from_slice(row);
        }
        Self {
            columns: self.columns,
            data,
        }
    }

    /// Ensure the table is wide enough for a column layout
    ///
    /// An empty table passes: it simply has nothing to plot.
    ///
    /// # Errors
    /// Returns [`TableError::TooNarrow`] if the table has fewer than `required` columns.
    pub fn require_columns(&self, required: usize) -> Result<(), TableError> {
        if !self.is_empty() && self.columns < required {
            return Err(TableError::TooNarrow {
                required,
                found: self.columns,
            });
        }
        Ok(())
    }

    fn check_column(&self, col: usize) -> Result<(), TableError> {
        if col >= self.columns && !self.is_empty() {
            return Err(TableError::ColumnOutOfRange {
                column: col,
                columns: self.columns,
            });
        }
        Ok(())
    }
}
