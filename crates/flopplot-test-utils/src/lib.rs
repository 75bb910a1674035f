//! Testing utilities for flopplot workspace
//!
//! Synthetic result tables shaped like the real benchmark output.

#![allow(missing_docs)]

use flopplot_data::{Precision, ResultTable, Version, VersionSet};

/// Problem sizes used by every synthetic table
pub const SIZES: [f64; 3] = [100.0, 1000.0, 10000.0];

/// Throughput at each size, scaled by `speed`
fn gflops(speed: f64, idx: usize) -> f64 {
    speed * (idx + 1) as f64
}

/// Time in seconds that yields `gflops(speed, idx)` for `gflop` work
fn time_for(gflop: f64, speed: f64, idx: usize) -> f64 {
    gflop / gflops(speed, idx)
}

/// `getrf` / `geqrf` layout: m, n, cpu flops, cpu time, gpu flops, gpu time, error
pub fn mn_factor_table(speed: f64) -> ResultTable {
    ResultTable::from_rows(SIZES.iter().enumerate().map(|(i, &n)| {
        [n, n, gflops(speed, i) / 2.0, 1.0, gflops(speed, i), 0.5, 1e-16]
    }))
    .unwrap()
}

/// `potrf` layout: n, cpu flops, cpu time, gpu flops, gpu time, error
pub fn potrf_table(speed: f64) -> ResultTable {
    ResultTable::from_rows(SIZES.iter().enumerate().map(|(i, &n)| {
        [n, gflops(speed, i) / 2.0, 1.0, gflops(speed, i), 0.5, 1e-16]
    }))
    .unwrap()
}

/// `geev` layout: n, cpu time, gpu time, error
pub fn geev_table(speed: f64) -> ResultTable {
    ResultTable::from_rows(SIZES.iter().enumerate().map(|(i, &n)| {
        let gflop = 1e-9 * 10.0 / 3.0 * n.powi(3);
        [n, f64::NAN, time_for(gflop, speed, i), 1e-15]
    }))
    .unwrap()
}

/// `syevd` layout: n, cpu time, gpu time, error
///
/// CPU time is NaN unless `cpu_speed` is given.
pub fn syev_table(speed: f64, vectors: bool, cpu_speed: Option<f64>) -> ResultTable {
    let coeff = if vectors { 14.0 / 3.0 } else { 4.0 / 3.0 };
    ResultTable::from_rows(SIZES.iter().enumerate().map(|(i, &n)| {
        let gflop = 1e-9 * coeff * n.powi(3);
        let cpu = cpu_speed.map_or(f64::NAN, |s| time_for(gflop, s, i));
        [n, cpu, time_for(gflop, speed, i), 1e-15]
    }))
    .unwrap()
}

/// SVD layout: job, m, n, cpu time, gpu time, error
///
/// Square rows for every size plus tall 3:1 rows.
pub fn svd_table(speed: f64, vectors: bool) -> ResultTable {
    let mut rows = Vec::new();
    for (i, &n) in SIZES.iter().enumerate() {
        for m in [n, 3.0 * n] {
            let (big, small) = (m.max(n), m.min(n));
            let gflop = if vectors {
                1e-9 * 2.0 * big * small * (big + 3.0 * small)
            } else {
                1e-9 * 4.0 * small * small * (3.0 * big - small) / 3.0
            };
            rows.push([0.0, m, n, f64::NAN, time_for(gflop, speed, i), 1e-15]);
        }
    }
    ResultTable::from_rows(rows).unwrap()
}

/// `symv` layout: n, then flops/time for gpu, atomics, cublas, cpu, then errors
pub fn symv_table(speed: f64) -> ResultTable {
    ResultTable::from_rows(SIZES.iter().enumerate().map(|(i, &n)| {
        let g = gflops(speed, i);
        [
            n, g, 0.1, g * 0.9, 0.1, g * 0.8, 0.1, g * 0.5, 0.2, 0.0, 0.0, 0.0,
        ]
    }))
    .unwrap()
}

/// Version with every routine for every precision
///
/// `lapack` fills the classic `syevd` CPU time column.
pub fn full_version(name: &str, speed: f64, lapack: bool) -> Version {
    let mut v = Version::new(name);
    let cpu = lapack.then_some(speed / 4.0);

    for p in Precision::ALL {
        for routine in ["getrf", "geqrf"] {
            let base = p.routine(routine, routine);
            v.insert_table(format!("{base}_gpu"), mn_factor_table(speed * 1.5));
            v.insert_table(base, mn_factor_table(speed));
        }
        let potrf = p.routine("potrf", "potrf");
        v.insert_table(format!("{potrf}_gpu"), potrf_table(speed * 1.5));
        v.insert_table(potrf, potrf_table(speed));

        for job in ["RN", "RV"] {
            v.insert_table(format!("{}_{job}", p.routine("geev", "geev")), geev_table(speed));
        }

        for (job, vectors) in [("JN", false), ("JV", true)] {
            v.insert_table(
                format!("{}_{job}", p.routine("syevd", "heevd")),
                syev_table(speed, vectors, cpu),
            );
            v.insert_table(
                format!("{}_{job}", p.routine("syevd_gpu", "heevd_gpu")),
                syev_table(speed * 1.2, vectors, None),
            );
            v.insert_table(
                format!("{}_{job}", p.routine("syevdx_2stage", "heevdx_2stage")),
                syev_table(speed * 2.0, vectors, None),
            );
        }

        for algo in ["gesvd", "gesdd"] {
            for (job, vectors) in [("UN", false), ("US", true)] {
                v.insert_table(format!("{}_{job}", p.routine(algo, algo)), svd_table(speed, vectors));
            }
        }

        v.insert_table(p.routine("symv", "hemv"), symv_table(speed));
    }
    v
}

/// Oldest-to-newest set of `n` full versions, each faster than the last
pub fn version_set(n: usize) -> VersionSet {
    VersionSet::new(
        (0..n)
            .map(|i| full_version(&format!("1.{i}.0"), 10.0 * (i + 1) as f64, i == 0))
            .collect(),
    )
}

/// Version file body in the JSON data format
pub fn version_json(name: &str, tables: &[(&str, &ResultTable)]) -> String {
    let tables: serde_json::Map<String, serde_json::Value> = tables
        .iter()
        .map(|(k, t)| {
            let rows: Vec<Vec<Option<f64>>> = t
                .iter_rows()
                .map(|r| r.iter().map(|v| (!v.is_nan()).then_some(*v)).collect())
                .collect();
            ((*k).to_string(), serde_json::json!(rows))
        })
        .collect();
    serde_json::json!({ "version": name, "tables": tables }).to_string()
}
