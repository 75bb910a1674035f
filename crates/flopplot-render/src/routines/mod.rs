//! Per-routine plot functions
//!
//! Each routine family has a `*_data` function (one curve), a `*_labels`
//! function (title, axis labels, legend, grid) and a `plot_*` function that
//! walks the versions and fills a 2x2 grid, one panel per precision:
//! single real, double real, single complex, double complex.

use std::fmt;
use std::str::FromStr;

use flopplot_data::{ResultTable, Version, VersionSet};
use tracing::debug;

use crate::error::PlotError;
use crate::model::LegendPosition;
use crate::session::PlotSession;

mod factor;
mod geev;
mod svd;
mod syev;
mod symv;

pub use factor::{
    factorization_data, factorization_labels, plot_factorization, plot_geqrf, plot_getrf,
    plot_potrf, Factorization, GEQRF, GETRF, POTRF,
};
pub use geev::{geev_data, geev_labels, plot_geev};
pub use svd::{plot_gesdd, plot_gesvd, plot_svd, svd_data, svd_labels, svd_title, SvdAlgorithm};
pub use syev::{plot_syev, syev_data, syev_labels, SyevOptions};
pub use symv::{plot_symv, symv_data, symv_labels};

/// Panel grid used by every routine plot
pub const GRID: (usize, usize) = (2, 2);

/// Labelled X ticks
pub const X_TICKS: [f64; 4] = [10.0, 100.0, 1000.0, 10000.0];

/// X axis limits
pub const X_LIMITS: (f64, f64) = (9.0, 20000.0);

pub(crate) const SIZE_LABEL: &str = "size (log scale)";
pub(crate) const GFLOPS_LABEL: &str = "Gflop/s";

/// Routine families that can be plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routine {
    Symv,
    Getrf,
    Potrf,
    Geqrf,
    Geev,
    Syev,
    Gesvd,
    Gesdd,
}

impl Routine {
    pub const ALL: [Self; 8] = [
        Self::Symv,
        Self::Getrf,
        Self::Potrf,
        Self::Geqrf,
        Self::Geev,
        Self::Syev,
        Self::Gesvd,
        Self::Gesdd,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Symv => "symv",
            Self::Getrf => "getrf",
            Self::Potrf => "potrf",
            Self::Geqrf => "geqrf",
            Self::Geev => "geev",
            Self::Syev => "syev",
            Self::Gesvd => "gesvd",
            Self::Gesdd => "gesdd",
        }
    }

    /// One-line usage, listing the options the routine honours
    #[must_use]
    pub fn usage(self) -> &'static str {
        match self {
            Self::Symv => "symv",
            Self::Getrf => "getrf",
            Self::Potrf => "potrf",
            Self::Geqrf => "geqrf",
            Self::Geev => "geev",
            Self::Syev => "syev   [--no-classic] [--no-classic-gpu] [--no-bulge] [--no-lapack]",
            Self::Gesvd => "gesvd  [--ratio R]  where R (M:N) in { 1, 3, 100, 1/3, 1/100 }",
            Self::Gesdd => "gesdd  [--ratio R]  where R (M:N) in { 1, 3, 100, 1/3, 1/100 }",
        }
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Routine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown routine {s:?}"))
    }
}

/// Options for routines that take them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutineOptions {
    /// SVD M:N aspect ratio
    pub ratio: f64,
    pub syev: SyevOptions,
}

impl Default for RoutineOptions {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            syev: SyevOptions::default(),
        }
    }
}

/// Draw one routine family into `session`
///
/// # Errors
/// Returns [`PlotError`] if a table does not fit its layout or the options
/// are invalid.
pub fn plot(
    session: &mut PlotSession,
    routine: Routine,
    versions: &VersionSet,
    options: &RoutineOptions,
) -> Result<(), PlotError> {
    debug!(%routine, versions = versions.len(), "plot");
    match routine {
        Routine::Symv => plot_symv(session, versions),
        Routine::Getrf => plot_getrf(session, versions),
        Routine::Potrf => plot_potrf(session, versions),
        Routine::Geqrf => plot_geqrf(session, versions),
        Routine::Geev => plot_geev(session, versions),
        Routine::Syev => plot_syev(session, versions, &options.syev),
        Routine::Gesvd => plot_gesvd(session, versions, options.ratio),
        Routine::Gesdd => plot_gesdd(session, versions, options.ratio),
    }
}

/// Title, legend, axis labels, log ticks and grid shared by every panel
pub(crate) fn apply_labels(
    session: &mut PlotSession,
    title: Option<&str>,
    x_label: &str,
    y_label: &str,
) {
    let axes = session.axes();
    if let Some(title) = title {
        axes.title = Some(title.to_string());
    }
    axes.legend = Some(LegendPosition::UpperLeft);
    axes.x_label = Some(x_label.to_string());
    axes.y_label = Some(y_label.to_string());
    axes.x_ticks = X_TICKS.to_vec();
    axes.x_limits = Some(X_LIMITS);
    axes.grid = true;
}

/// Label every panel of the grid, then size the figure(s)
pub(crate) fn finish_grid<F>(session: &mut PlotSession, mut label: F) -> Result<(), PlotError>
where
    F: FnMut(&mut PlotSession),
{
    let (rows, cols) = GRID;
    for index in 1..=rows * cols {
        session.subplot(rows, cols, index)?;
        label(session);
    }
    let figsize = session.figsize();
    session.resize(figsize, rows, cols)?;
    Ok(())
}

/// Start a figure and clear its panels
pub(crate) fn start_grid(session: &mut PlotSession, fig: u32) -> Result<(), PlotError> {
    let (rows, cols) = GRID;
    session.figure(fig);
    session.clf(rows, cols)?;
    Ok(())
}

/// Select panel `index` of the grid
pub(crate) fn panel(session: &mut PlotSession, index: usize) -> Result<(), PlotError> {
    let (rows, cols) = GRID;
    session.subplot(rows, cols, index)?;
    Ok(())
}

/// Copy out a column, naming the table on failure
pub(crate) fn column(table: &ResultTable, name: &str, col: usize) -> Result<Vec<f64>, PlotError> {
    table.column(col).map_err(|e| PlotError::table(name, e))
}

/// Check a table is wide enough for its layout
pub(crate) fn require(table: &ResultTable, name: &str, columns: usize) -> Result<(), PlotError> {
    table
        .require_columns(columns)
        .map_err(|e| PlotError::table(name, e))
}

/// Legend text for a version's curve
pub(crate) fn version_label(version: &Version, table: &str) -> String {
    format!("{} {}", version.name(), table)
}

/// Look up a table a version is expected to have
pub(crate) fn expect_table<'a>(version: &'a Version, name: &str) -> Option<&'a ResultTable> {
    let table = version.table(name);
    if table.is_none() {
        tracing::warn!(version = version.name(), table = name, "table missing, curve skipped");
    }
    table
}
