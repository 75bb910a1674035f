//! Singular value decomposition: QR-iteration (`gesvd`) and divide-and-conquer (`gesdd`)
//!
//! Each table mixes several aspect ratios; a plot picks one M:N ratio and
//! keeps only the rows with `m = ratio * n`. Throughput is derived from the
//! standard operation counts with `M = max(m, n)`, `N = min(m, n)`:
//!
//! - no vectors: `4 N^2 (3M - N) / 3`, i.e. `8n^3/3` when square
//! - some vectors: `2 M N (M + 3N)`, i.e. `8n^3` when square

use std::fmt;

use flopplot_data::columns::svd;
use flopplot_data::{Precision, ResultTable, Rgb, VersionSet};
use tracing::debug;

use super::{
    apply_labels, expect_table, finish_grid, panel, require, start_grid, version_label,
};
use crate::error::PlotError;
use crate::format::format_g;
use crate::session::PlotSession;

/// Relative tolerance when matching `m` against `ratio * n`
const RATIO_TOLERANCE: f64 = 1e-6;

/// SVD driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvdAlgorithm {
    /// QR iteration
    Gesvd,
    /// Divide and conquer
    Gesdd,
}

impl SvdAlgorithm {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gesvd => "gesvd",
            Self::Gesdd => "gesdd",
        }
    }

    /// Figure for the no-vectors plot; some-vectors uses the next one
    #[must_use]
    pub fn first_figure(self) -> u32 {
        match self {
            Self::Gesvd => 1,
            Self::Gesdd => 3,
        }
    }
}

impl fmt::Display for SvdAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn svd_gflop(m: f64, n: f64, vectors: bool) -> f64 {
    let big = m.max(n);
    let small = m.min(n);
    if vectors {
        1e-9 * 2.0 * big * small * (big + 3.0 * small)
    } else {
        1e-9 * 4.0 * small * small * (3.0 * big - small) / 3.0
    }
}

fn matches_ratio(m: f64, n: f64, ratio: f64) -> bool {
    let target = ratio * n;
    (m - target).abs() <= RATIO_TOLERANCE * target.abs().max(1.0)
}

fn is_square(ratio: f64) -> bool {
    (ratio - 1.0).abs() < f64::EPSILON
}

/// One derived GFLOP/s curve for the rows of `table` with aspect `ratio`
///
/// X is `min(m, n)`; Y uses GPU time.
///
/// # Errors
/// Returns [`PlotError`] if the table is narrower than the layout or
/// `format` is invalid.
#[allow(clippy::too_many_arguments)]
pub fn svd_data(
    session: &mut PlotSession,
    table_name: &str,
    table: &ResultTable,
    vectors: bool,
    format: &str,
    color: Rgb,
    label: Option<String>,
    ratio: f64,
) -> Result<(), PlotError> {
    require(table, table_name, svd::COLUMNS)?;
    let selected = table.select_rows(|r| matches_ratio(r[svd::M], r[svd::N], ratio));
    let points = selected
        .iter_rows()
        .map(|r| {
            let (m, n) = (r[svd::M], r[svd::N]);
            (m.min(n), svd_gflop(m, n, vectors) / r[svd::GPU_TIME])
        })
        .collect();
    session.semilogx(points, format, Some(color), label)
}

/// Panel labels for an SVD plot
pub fn svd_labels(session: &mut PlotSession, title: Option<&str>, vectors: bool, square: bool) {
    let y_label = match (vectors, square) {
        (true, true) => "Gflop/s   8n^3/t",
        (true, false) => "Gflop/s   2mn(m + 3n)/t",
        (false, true) => "Gflop/s   8n^3/(3t)",
        (false, false) => "Gflop/s   4n^2(3m - n)/(3t)",
    };
    apply_labels(session, title, "size, min(M,N)", y_label);
}

/// Panel title, e.g. `no vectors, M:N ratio 1:3`
#[must_use]
pub fn svd_title(vectors: bool, ratio: f64) -> String {
    let (m, n) = if ratio >= 1.0 {
        (ratio, 1.0)
    } else {
        (1.0, 1.0 / ratio)
    };
    format!(
        "{} vectors, M:N ratio {}:{}",
        if vectors { "some" } else { "no" },
        format_g(m, 3),
        format_g(n, 3)
    )
}

/// No-vectors (`_UN`) and some-vectors (`_US`) figures for one driver
///
/// `gesvd` uses figures 1 and 2, `gesdd` figures 3 and 4. Double-complex
/// tables are optional.
///
/// # Errors
/// Returns [`PlotError::InvalidRatio`] for a non-positive ratio, or if a
/// table does not fit its layout.
pub fn plot_svd(
    session: &mut PlotSession,
    algorithm: SvdAlgorithm,
    versions: &VersionSet,
    ratio: f64,
) -> Result<(), PlotError> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(PlotError::InvalidRatio(ratio));
    }
    let base = algorithm.first_figure();
    let jobs = [(base, "UN", false), (base + 1, "US", true)];

    for (fig, job, vectors) in jobs {
        start_grid(session, fig)?;

        for v in versions {
            if !v.has_table(&format!("s{algorithm}_{job}")) {
                debug!(version = v.name(), %algorithm, job, "no data, skipped");
                continue;
            }
            for precision in Precision::ALL {
                let routine = precision.routine(algorithm.name(), algorithm.name());
                let name = format!("{routine}_{job}");
                let table = if precision == Precision::DoubleComplex {
                    v.table(&name)
                } else {
                    expect_table(v, &name)
                };
                let Some(table) = table else { continue };

                panel(session, precision.panel())?;
                svd_data(
                    session,
                    &name,
                    table,
                    vectors,
                    ".-",
                    v.color(),
                    Some(version_label(v, &routine)),
                    ratio,
                )?;
            }
        }

        let title = svd_title(vectors, ratio);
        let square = is_square(ratio);
        finish_grid(session, |s| svd_labels(s, Some(&title), vectors, square))?;
    }
    Ok(())
}

/// `gesvd` plots, figures 1 and 2
///
/// # Errors
/// See [`plot_svd`].
pub fn plot_gesvd(
    session: &mut PlotSession,
    versions: &VersionSet,
    ratio: f64,
) -> Result<(), PlotError> {
    plot_svd(session, SvdAlgorithm::Gesvd, versions, ratio)
}

/// `gesdd` plots, figures 3 and 4
///
/// # Errors
/// See [`plot_svd`].
pub fn plot_gesdd(
    session: &mut PlotSession,
    versions: &VersionSet,
    ratio: f64,
) -> Result<(), PlotError> {
    plot_svd(session, SvdAlgorithm::Gesdd, versions, ratio)
}
