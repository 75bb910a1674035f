//! Symmetric / Hermitian matrix-vector product (`symv`, `hemv`)
//!
//! The tables also time vendor kernels. Those reference curves (cuBLAS with
//! and without atomics, MKL on the CPU) are drawn once per panel, from the
//! first version plotted there, in grey and black.

use flopplot_data::columns::symv;
use flopplot_data::{Precision, ResultTable, Rgb, VersionSet};
use tracing::debug;

use super::{
    apply_labels, column, expect_table, finish_grid, panel, require, start_grid, version_label,
    GFLOPS_LABEL, SIZE_LABEL,
};
use crate::error::PlotError;
use crate::session::PlotSession;

/// Reference curves: flops column, format, color, label
const REFERENCES: [(usize, &str, Rgb, &str); 3] = [
    (symv::ATOMICS_FLOPS, "k--", Rgb::GREY, "cublas atomics"),
    (symv::CUBLAS_FLOPS, "k-.", Rgb::GREY, "cublas"),
    (symv::CPU_FLOPS, "k-", Rgb::BLACK, "MKL"),
];

/// Library GFLOP/s curve, preceded by the reference curves when `first`
///
/// # Errors
/// Returns [`PlotError`] if the table is narrower than the layout or
/// `format` is invalid.
#[allow(clippy::too_many_arguments)]
pub fn symv_data(
    session: &mut PlotSession,
    table_name: &str,
    table: &ResultTable,
    format: &str,
    color: Rgb,
    label: Option<String>,
    first: bool,
) -> Result<(), PlotError> {
    require(table, table_name, symv::COLUMNS)?;
    let n = column(table, table_name, symv::N)?;
    let curve = |col: usize| -> Result<Vec<(f64, f64)>, PlotError> {
        let y = column(table, table_name, col)?;
        Ok(n.iter().copied().zip(y).collect())
    };

    if first {
        for (col, format, color, label) in REFERENCES {
            session.semilogx(curve(col)?, format, Some(color), Some(label.to_string()))?;
        }
    }
    session.semilogx(curve(symv::GPU_FLOPS)?, format, Some(color), label)
}

/// Panel labels for a `symv` plot
pub fn symv_labels(session: &mut PlotSession, title: Option<&str>) {
    apply_labels(session, title, SIZE_LABEL, GFLOPS_LABEL);
}

/// Figure 1: every version's kernel, one panel per precision
///
/// # Errors
/// Returns [`PlotError`] if a table does not fit its layout.
pub fn plot_symv(session: &mut PlotSession, versions: &VersionSet) -> Result<(), PlotError> {
    start_grid(session, 1)?;

    // references come from the first version drawn in each panel
    let mut referenced = [false; 4];
    for v in versions {
        if !v.has_table("ssymv") {
            debug!(version = v.name(), "no symv data, skipped");
            continue;
        }
        for precision in Precision::ALL {
            panel(session, precision.panel())?;
            let name = precision.routine("symv", "hemv");
            if let Some(table) = expect_table(v, &name) {
                let done = &mut referenced[precision.panel() - 1];
                symv_data(
                    session,
                    &name,
                    table,
                    "-",
                    v.color(),
                    Some(version_label(v, &name)),
                    !*done,
                )?;
                *done = true;
            }
        }
    }

    finish_grid(session, |s| symv_labels(s, None))
}
