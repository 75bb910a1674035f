//! Symmetric / Hermitian eigenvalue problem (`syevd`, `heevd`)
//!
//! Three variants per version: the 2-stage bulge-chasing driver
//! (`syevdx_2stage`, squares), the classic driver (dots) and its GPU
//! interface (crosses). A LAPACK reference curve, taken from the CPU time
//! column, is drawn once in black.

use flopplot_data::columns::syev;
use flopplot_data::{Precision, ResultTable, Rgb, Version, VersionSet};
use tracing::{debug, info};

use super::{
    apply_labels, column, expect_table, finish_grid, panel, require, start_grid, version_label,
    SIZE_LABEL,
};
use crate::error::PlotError;
use crate::session::PlotSession;

/// Which curves [`plot_syev`] draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyevOptions {
    /// Classic driver, CPU interface
    pub classic: bool,
    /// Classic driver, GPU interface
    pub classic_gpu: bool,
    /// 2-stage driver
    pub bulge: bool,
    /// LAPACK reference
    pub lapack: bool,
}

impl Default for SyevOptions {
    fn default() -> Self {
        Self {
            classic: true,
            classic_gpu: true,
            bulge: true,
            lapack: true,
        }
    }
}

/// Nominal GFLOP count: `4/3 n^3` for eigenvalues only, `14/3 n^3` with vectors
#[must_use]
pub(crate) fn syev_gflop(n: f64, vectors: bool) -> f64 {
    let coeff = if vectors { 14.0 / 3.0 } else { 4.0 / 3.0 };
    1e-9 * coeff * n.powi(3)
}

/// One derived GFLOP/s curve from a `syevd` table
///
/// `time_column` is [`syev::GPU_TIME`] for library curves and
/// [`syev::CPU_TIME`] for the LAPACK reference.
///
/// # Errors
/// Returns [`PlotError`] if the table is narrower than the layout or
/// `format` is invalid.
#[allow(clippy::too_many_arguments)]
pub fn syev_data(
    session: &mut PlotSession,
    table_name: &str,
    table: &ResultTable,
    vectors: bool,
    format: &str,
    color: Rgb,
    label: Option<String>,
    time_column: usize,
) -> Result<(), PlotError> {
    require(table, table_name, syev::COLUMNS)?;
    let n = column(table, table_name, syev::N)?;
    let t = column(table, table_name, time_column)?;
    let points = n
        .into_iter()
        .zip(t)
        .map(|(n, t)| (n, syev_gflop(n, vectors) / t))
        .collect();
    session.semilogx(points, format, Some(color), label)
}

/// Panel labels for a `syevd` plot
pub fn syev_labels(session: &mut PlotSession, title: Option<&str>, vectors: bool) {
    let y_label = if vectors {
        "Gflop/s   14/3 n^3 / t"
    } else {
        "Gflop/s   4/3 n^3 / t"
    };
    apply_labels(session, title, SIZE_LABEL, y_label);
}

/// Driver variant: routine base names and curve format
struct Variant {
    real: &'static str,
    complex: &'static str,
    format: &'static str,
}

const BULGE: Variant = Variant {
    real: "syevdx_2stage",
    complex: "heevdx_2stage",
    format: "s-",
};

const CLASSIC: Variant = Variant {
    real: "syevd",
    complex: "heevd",
    format: ".-",
};

const CLASSIC_GPU: Variant = Variant {
    real: "syevd_gpu",
    complex: "heevd_gpu",
    format: "x-",
};

fn draw_variant(
    session: &mut PlotSession,
    v: &Version,
    variant: &Variant,
    job: &str,
    vectors: bool,
) -> Result<(), PlotError> {
    if !v.has_table(&format!("s{}_{job}", variant.real)) {
        debug!(version = v.name(), routine = variant.real, job, "no data, skipped");
        return Ok(());
    }
    for precision in Precision::ALL {
        panel(session, precision.panel())?;
        let routine = precision.routine(variant.real, variant.complex);
        let name = format!("{routine}_{job}");
        if let Some(table) = expect_table(v, &name) {
            syev_data(
                session,
                &name,
                table,
                vectors,
                variant.format,
                v.color(),
                Some(version_label(v, &routine)),
                syev::GPU_TIME,
            )?;
        }
    }
    Ok(())
}

/// Oldest version whose classic table carries a CPU (LAPACK) timing
fn lapack_source<'a>(versions: &'a VersionSet, job: &str) -> Option<&'a Version> {
    let key = format!("ssyevd_{job}");
    versions.iter().find(|v| {
        v.table(&key)
            .and_then(|t| t.get(0, syev::CPU_TIME))
            .is_some_and(|t| !t.is_nan())
    })
}

/// Figure 1: eigenvalues only (`_JN`); figure 2: with vectors (`_JV`)
///
/// # Errors
/// Returns [`PlotError`] if a table does not fit its layout.
pub fn plot_syev(
    session: &mut PlotSession,
    versions: &VersionSet,
    options: &SyevOptions,
) -> Result<(), PlotError> {
    let jobs = [(1, "JN", false, "no vectors"), (2, "JV", true, "with vectors")];

    for (fig, job, vectors, title) in jobs {
        start_grid(session, fig)?;

        for v in versions {
            if options.bulge {
                draw_variant(session, v, &BULGE, job, vectors)?;
            }
            if options.classic {
                draw_variant(session, v, &CLASSIC, job, vectors)?;
            }
            if options.classic_gpu {
                draw_variant(session, v, &CLASSIC_GPU, job, vectors)?;
            }
        }

        // reference last so it sits on top
        if options.lapack {
            if let Some(v) = lapack_source(versions, job) {
                info!(version = v.name(), job, "found LAPACK reference");
                for precision in Precision::ALL {
                    panel(session, precision.panel())?;
                    let routine = precision.routine(CLASSIC.real, CLASSIC.complex);
                    let name = format!("{routine}_{job}");
                    if let Some(table) = expect_table(v, &name) {
                        syev_data(
                            session,
                            &name,
                            table,
                            vectors,
                            "k+-",
                            Rgb::BLACK,
                            Some(format!("lapack {routine}")),
                            syev::CPU_TIME,
                        )?;
                    }
                }
            }
        }

        finish_grid(session, |s| syev_labels(s, Some(title), vectors))?;
    }
    Ok(())
}
