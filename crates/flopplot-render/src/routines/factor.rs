//! One-sided factorizations: LU (`getrf`), Cholesky (`potrf`), QR (`geqrf`)
//!
//! These tables carry a measured GFLOP/s column, plotted directly against
//! the leading dimension. CPU-interface and GPU-interface variants share a
//! panel: `.-` for `?getrf`, `x-` for `?getrf_gpu`.

use flopplot_data::columns::{geqrf, getrf, potrf};
use flopplot_data::{Precision, ResultTable, Rgb, VersionSet};
use tracing::debug;

use super::{
    apply_labels, column, expect_table, finish_grid, panel, require, start_grid, version_label,
    GFLOPS_LABEL, SIZE_LABEL,
};
use crate::error::PlotError;
use crate::session::PlotSession;

/// Table layout of one factorization routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factorization {
    /// Routine name without precision prefix
    pub name: &'static str,
    /// Column plotted on X
    pub size_column: usize,
    /// Column plotted on Y
    pub flops_column: usize,
    pub columns: usize,
}

pub const GETRF: Factorization = Factorization {
    name: "getrf",
    size_column: getrf::M,
    flops_column: getrf::GPU_FLOPS,
    columns: getrf::COLUMNS,
};

pub const POTRF: Factorization = Factorization {
    name: "potrf",
    size_column: potrf::N,
    flops_column: potrf::GPU_FLOPS,
    columns: potrf::COLUMNS,
};

pub const GEQRF: Factorization = Factorization {
    name: "geqrf",
    size_column: geqrf::M,
    flops_column: geqrf::GPU_FLOPS,
    columns: geqrf::COLUMNS,
};

impl Factorization {
    /// Table name for a precision, e.g. `dpotrf`
    #[must_use]
    pub fn table_name(&self, precision: Precision) -> String {
        precision.routine(self.name, self.name)
    }
}

/// One GFLOP/s curve from a factorization table
///
/// # Errors
/// Returns [`PlotError`] if the table is narrower than the layout or
/// `format` is invalid.
pub fn factorization_data(
    session: &mut PlotSession,
    routine: &Factorization,
    table_name: &str,
    table: &ResultTable,
    format: &str,
    color: Rgb,
    label: Option<String>,
) -> Result<(), PlotError> {
    require(table, table_name, routine.columns)?;
    let x = column(table, table_name, routine.size_column)?;
    let y = column(table, table_name, routine.flops_column)?;
    session.semilogx(x.into_iter().zip(y).collect(), format, Some(color), label)
}

/// Panel labels for a factorization plot
pub fn factorization_labels(session: &mut PlotSession, title: Option<&str>) {
    apply_labels(session, title, SIZE_LABEL, GFLOPS_LABEL);
}

/// Figure 1: every version's CPU- and GPU-interface curves, one panel per precision
///
/// Versions without the single-precision table are skipped entirely.
///
/// # Errors
/// Returns [`PlotError`] if a table does not fit its layout.
pub fn plot_factorization(
    session: &mut PlotSession,
    routine: &Factorization,
    versions: &VersionSet,
) -> Result<(), PlotError> {
    start_grid(session, 1)?;

    for v in versions {
        if !v.has_table(&routine.table_name(Precision::Single)) {
            debug!(version = v.name(), routine = routine.name, "no data, skipped");
            continue;
        }

        for precision in Precision::ALL {
            panel(session, precision.panel())?;
            let cpu = routine.table_name(precision);
            let gpu = format!("{cpu}_gpu");
            for (name, format) in [(cpu.as_str(), ".-"), (gpu.as_str(), "x-")] {
                if let Some(table) = expect_table(v, name) {
                    factorization_data(
                        session,
                        routine,
                        name,
                        table,
                        format,
                        v.color(),
                        Some(version_label(v, name)),
                    )?;
                }
            }
        }
    }

    finish_grid(session, |s| factorization_labels(s, None))
}

/// LU factorization plot
///
/// # Errors
/// See [`plot_factorization`].
pub fn plot_getrf(session: &mut PlotSession, versions: &VersionSet) -> Result<(), PlotError> {
    plot_factorization(session, &GETRF, versions)
}

/// Cholesky factorization plot
///
/// # Errors
/// See [`plot_factorization`].
pub fn plot_potrf(session: &mut PlotSession, versions: &VersionSet) -> Result<(), PlotError> {
    plot_factorization(session, &POTRF, versions)
}

/// QR factorization plot
///
/// # Errors
/// See [`plot_factorization`].
pub fn plot_geqrf(session: &mut PlotSession, versions: &VersionSet) -> Result<(), PlotError> {
    plot_factorization(session, &GEQRF, versions)
}
