//! Non-symmetric eigenvalue problem (`geev`)
//!
//! Tables hold times only; throughput is derived from the nominal
//! `10/3 n^3` operation count for both the no-vector and right-vector jobs.

use flopplot_data::columns::geev;
use flopplot_data::{Precision, ResultTable, Rgb, VersionSet};
use tracing::debug;

use super::{
    apply_labels, column, expect_table, finish_grid, panel, require, start_grid, version_label,
    SIZE_LABEL,
};
use crate::error::PlotError;
use crate::session::PlotSession;

/// Nominal GFLOP count for an `n x n` problem
///
/// The right-vector job uses the same count; the eigenvector back-transform
/// is not credited.
#[must_use]
pub(crate) fn geev_gflop(n: f64, _vectors: bool) -> f64 {
    1e-9 * 10.0 / 3.0 * n.powi(3)
}

/// One derived GFLOP/s curve from a `geev` table, using GPU time
///
/// # Errors
/// Returns [`PlotError`] if the table is narrower than the layout or
/// `format` is invalid.
pub fn geev_data(
    session: &mut PlotSession,
    table_name: &str,
    table: &ResultTable,
    vectors: bool,
    format: &str,
    color: Rgb,
    label: Option<String>,
) -> Result<(), PlotError> {
    require(table, table_name, geev::COLUMNS)?;
    let n = column(table, table_name, geev::N)?;
    let t = column(table, table_name, geev::GPU_TIME)?;
    let points = n
        .into_iter()
        .zip(t)
        .map(|(n, t)| (n, geev_gflop(n, vectors) / t))
        .collect();
    session.semilogx(points, format, Some(color), label)
}

/// Panel labels for a `geev` plot
pub fn geev_labels(session: &mut PlotSession, title: Option<&str>, _vectors: bool) {
    apply_labels(session, title, SIZE_LABEL, "Gflop/s   10n^3/(3t)");
}

/// Figure 1: no vectors (`?geev_RN`); figure 2: right vectors (`?geev_RV`)
///
/// # Errors
/// Returns [`PlotError`] if a table does not fit its layout.
pub fn plot_geev(session: &mut PlotSession, versions: &VersionSet) -> Result<(), PlotError> {
    let jobs = [
        (1, "RN", false, "no vectors"),
        (2, "RV", true, "with right vectors"),
    ];

    for (fig, job, vectors, title) in jobs {
        start_grid(session, fig)?;

        for v in versions {
            if !v.has_table(&format!("sgeev_{job}")) {
                debug!(version = v.name(), job, "no geev data, skipped");
                continue;
            }
            for precision in Precision::ALL {
                panel(session, precision.panel())?;
                let routine = precision.routine("geev", "geev");
                let name = format!("{routine}_{job}");
                if let Some(table) = expect_table(v, &name) {
                    geev_data(
                        session,
                        &name,
                        table,
                        vectors,
                        ".-",
                        v.color(),
                        Some(version_label(v, &routine)),
                    )?;
                }
            }
        }

        finish_grid(session, |s| geev_labels(s, Some(title), vectors))?;
    }
    Ok(())
}
