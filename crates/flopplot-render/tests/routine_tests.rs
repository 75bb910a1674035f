use flopplot_data::{ResultTable, Rgb, Version, VersionSet};
use flopplot_render::routines::{
    self, plot_geev, plot_gesdd, plot_gesvd, plot_getrf, plot_potrf, plot_symv, plot_syev,
};
use flopplot_render::{
    Axes, Figure, LegendPosition, LineStyle, Marker, PlotError, PlotSession, Routine,
    RoutineOptions, SyevOptions,
};
use flopplot_test_utils::{full_version, mn_factor_table, version_set, SIZES};
use pretty_assertions::assert_eq;

fn figure(session: &PlotSession, id: u32) -> &Figure {
    session
        .figure_by_id(id)
        .unwrap_or_else(|| panic!("figure {id} missing"))
}

fn panel(session: &PlotSession, fig: u32, index: usize) -> &Axes {
    figure(session, fig)
        .axes_at(index)
        .unwrap_or_else(|| panic!("figure {fig} panel {index} missing"))
}

fn labels(axes: &Axes) -> Vec<&str> {
    axes.labels().collect()
}

fn ys(axes: &Axes, label: &str) -> Vec<f64> {
    axes.series
        .iter()
        .find(|s| s.label.as_deref() == Some(label))
        .unwrap_or_else(|| panic!("no series {label}"))
        .points
        .iter()
        .map(|p| p.1)
        .collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() <= 1e-9 * e.abs().max(1.0), "{actual:?} vs {expected:?}");
    }
}

#[test]
fn getrf_fills_four_panels() {
    let versions = version_set(3);
    let mut s = PlotSession::new(true);
    plot_getrf(&mut s, &versions).unwrap();

    let ids: Vec<u32> = s.figures().map(Figure::id).collect();
    assert_eq!(ids, vec![1]);
    let fig = figure(&s, 1);
    assert_eq!(fig.grid(), (2, 2));
    assert_eq!(fig.size(), (9.0, 7.0));
    assert_eq!(fig.axes().len(), 4);

    let d = panel(&s, 1, 2);
    assert_eq!(
        labels(d),
        vec![
            "1.0.0 dgetrf",
            "1.0.0 dgetrf_gpu",
            "1.1.0 dgetrf",
            "1.1.0 dgetrf_gpu",
            "1.2.0 dgetrf",
            "1.2.0 dgetrf_gpu",
        ]
    );
    assert_eq!(d.series[0].style.marker, Marker::Point);
    assert_eq!(d.series[1].style.marker, Marker::Cross);
    assert_eq!(d.series[0].color, versions.get(0).unwrap().color());
    assert_eq!(d.series[5].color, versions.get(2).unwrap().color());

    let xs: Vec<f64> = d.series[0].points.iter().map(|p| p.0).collect();
    assert_eq!(xs, SIZES.to_vec());
    assert_close(&ys(d, "1.0.0 dgetrf"), &[10.0, 20.0, 30.0]);
    assert_close(&ys(d, "1.0.0 dgetrf_gpu"), &[15.0, 30.0, 45.0]);
}

#[test]
fn common_labels_on_every_panel() {
    let mut s = PlotSession::new(true);
    plot_potrf(&mut s, &version_set(2)).unwrap();
    for axes in figure(&s, 1).axes() {
        assert_eq!(axes.x_label.as_deref(), Some("size (log scale)"));
        assert_eq!(axes.y_label.as_deref(), Some("Gflop/s"));
        assert_eq!(axes.x_ticks, vec![10.0, 100.0, 1000.0, 10000.0]);
        assert_eq!(axes.x_limits, Some((9.0, 20000.0)));
        assert_eq!(axes.legend, Some(LegendPosition::UpperLeft));
        assert!(axes.grid);
        assert!(axes.title.is_none());
    }
    assert_eq!(labels(panel(&s, 1, 3))[0], "1.0.0 cpotrf");
}

#[test]
fn separate_mode_gives_figure_per_panel() {
    let mut s = PlotSession::new(false);
    plot_getrf(&mut s, &version_set(2)).unwrap();

    let ids: Vec<u32> = s.figures().map(Figure::id).collect();
    assert_eq!(ids, vec![11, 12, 13, 14]);
    for fig in s.figures() {
        assert_eq!(fig.size(), (4.5, 3.5));
        assert_eq!(fig.axes().len(), 1);
        assert_eq!(fig.axes()[0].series.len(), 4);
    }
    assert_eq!(labels(&figure(&s, 14).axes()[0])[0], "1.0.0 zgetrf");
}

#[test]
fn versions_without_data_are_skipped() {
    let versions = VersionSet::new(vec![
        Version::new("empty"),
        full_version("1.6.0", 10.0, false),
    ]);
    let mut s = PlotSession::default();
    plot_getrf(&mut s, &versions).unwrap();
    assert_eq!(
        labels(panel(&s, 1, 1)),
        vec!["1.6.0 sgetrf", "1.6.0 sgetrf_gpu"]
    );
}

#[test]
fn narrow_table_is_an_error() {
    let narrow = ResultTable::from_rows([[100.0, 100.0, 1.0]]).unwrap();
    let versions = VersionSet::new(vec![Version::new("x").with_table("sgetrf", narrow)]);
    let err = plot_getrf(&mut PlotSession::default(), &versions).unwrap_err();
    assert!(matches!(err, PlotError::Table { ref table, .. } if table == "sgetrf"));
}

#[test]
fn geev_derives_throughput() {
    let mut s = PlotSession::default();
    plot_geev(&mut s, &version_set(2)).unwrap();

    let ids: Vec<u32> = s.figures().map(Figure::id).collect();
    assert_eq!(ids, vec![1, 2]);

    let p = panel(&s, 1, 4);
    assert_eq!(p.title.as_deref(), Some("no vectors"));
    assert_eq!(labels(p), vec!["1.0.0 zgeev", "1.1.0 zgeev"]);
    assert_close(&ys(p, "1.1.0 zgeev"), &[20.0, 40.0, 60.0]);

    assert_eq!(panel(&s, 2, 1).title.as_deref(), Some("with right vectors"));
}

#[test]
fn syev_draws_variants_then_lapack() {
    let mut s = PlotSession::default();
    plot_syev(&mut s, &version_set(2), &SyevOptions::default()).unwrap();

    let p = panel(&s, 1, 3);
    assert_eq!(
        labels(p),
        vec![
            "1.0.0 cheevdx_2stage",
            "1.0.0 cheevd",
            "1.0.0 cheevd_gpu",
            "1.1.0 cheevdx_2stage",
            "1.1.0 cheevd",
            "1.1.0 cheevd_gpu",
            "lapack cheevd",
        ]
    );
    assert_eq!(p.title.as_deref(), Some("no vectors"));
    assert_eq!(p.series[0].style.marker, Marker::Square);

    let lapack = p.series.last().unwrap();
    assert_eq!(lapack.color, Rgb::BLACK);
    assert_eq!(lapack.style.marker, Marker::Plus);
    // cpu speed is a quarter of the gpu speed of version 1.0.0
    assert_close(&ys(p, "lapack cheevd"), &[2.5, 5.0, 7.5]);
    assert_close(&ys(p, "1.0.0 cheevd"), &[10.0, 20.0, 30.0]);

    let with_vectors = panel(&s, 2, 1);
    assert_eq!(with_vectors.title.as_deref(), Some("with vectors"));
    assert_eq!(with_vectors.y_label.as_deref(), Some("Gflop/s   14/3 n^3 / t"));
    assert_close(&ys(with_vectors, "1.1.0 ssyevd"), &[20.0, 40.0, 60.0]);
}

#[test]
fn syev_toggles() {
    let options = SyevOptions {
        bulge: false,
        lapack: false,
        ..SyevOptions::default()
    };
    let mut s = PlotSession::default();
    plot_syev(&mut s, &version_set(1), &options).unwrap();
    assert_eq!(
        labels(panel(&s, 2, 2)),
        vec!["1.0.0 dsyevd", "1.0.0 dsyevd_gpu"]
    );
}

#[test]
fn syev_without_cpu_timing_has_no_reference() {
    let versions = VersionSet::new(vec![full_version("a", 10.0, false)]);
    let mut s = PlotSession::default();
    plot_syev(&mut s, &versions, &SyevOptions::default()).unwrap();
    assert!(labels(panel(&s, 1, 1)).iter().all(|l| !l.starts_with("lapack")));
}

#[test]
fn gesvd_square_and_tall() {
    let mut s = PlotSession::default();
    plot_gesvd(&mut s, &version_set(1), 1.0).unwrap();
    let ids: Vec<u32> = s.figures().map(Figure::id).collect();
    assert_eq!(ids, vec![1, 2]);

    let p = panel(&s, 1, 1);
    assert_eq!(p.title.as_deref(), Some("no vectors, M:N ratio 1:1"));
    assert_eq!(p.y_label.as_deref(), Some("Gflop/s   8n^3/(3t)"));
    assert_eq!(p.x_label.as_deref(), Some("size, min(M,N)"));
    assert_close(&ys(p, "1.0.0 sgesvd"), &[10.0, 20.0, 30.0]);

    let mut s = PlotSession::default();
    plot_gesvd(&mut s, &version_set(1), 3.0).unwrap();
    let p = panel(&s, 2, 2);
    assert_eq!(p.title.as_deref(), Some("some vectors, M:N ratio 3:1"));
    assert_eq!(p.y_label.as_deref(), Some("Gflop/s   2mn(m + 3n)/t"));
    let xs: Vec<f64> = p.series[0].points.iter().map(|q| q.0).collect();
    assert_eq!(xs, SIZES.to_vec());
    assert_close(&ys(p, "1.0.0 dgesvd"), &[10.0, 20.0, 30.0]);
}

#[test]
fn gesvd_ratio_without_rows_plots_empty_curves() {
    let mut s = PlotSession::default();
    plot_gesvd(&mut s, &version_set(1), 1.0 / 3.0).unwrap();
    let p = panel(&s, 1, 1);
    assert_eq!(p.title.as_deref(), Some("no vectors, M:N ratio 1:3"));
    assert!(p.series[0].points.is_empty());
}

#[test]
fn gesdd_uses_figures_three_and_four() {
    let mut s = PlotSession::default();
    plot_gesdd(&mut s, &version_set(2), 1.0).unwrap();
    let ids: Vec<u32> = s.figures().map(Figure::id).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(labels(panel(&s, 4, 3)), vec!["1.0.0 cgesdd", "1.1.0 cgesdd"]);
}

#[test]
fn double_complex_svd_is_optional() {
    let full = full_version("1.6.0", 10.0, false);
    let mut partial = Version::new("1.5.0");
    for name in ["sgesvd_UN", "dgesvd_UN", "cgesvd_UN"] {
        partial.insert_table(name, full.table(name).unwrap().clone());
    }
    let versions = VersionSet::new(vec![partial, full]);

    let mut s = PlotSession::default();
    plot_gesvd(&mut s, &versions, 1.0).unwrap();
    assert_eq!(labels(panel(&s, 1, 4)), vec!["1.6.0 zgesvd"]);
    assert_eq!(labels(panel(&s, 1, 3)), vec!["1.5.0 cgesvd", "1.6.0 cgesvd"]);
    // 1.5.0 has no US tables at all
    assert_eq!(labels(panel(&s, 2, 1)), vec!["1.6.0 sgesvd"]);
}

#[test]
fn invalid_ratio_rejected() {
    for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = plot_gesvd(&mut PlotSession::default(), &version_set(1), ratio).unwrap_err();
        assert!(matches!(err, PlotError::InvalidRatio(_)));
    }
}

#[test]
fn symv_references_come_from_first_version() {
    let mut s = PlotSession::default();
    plot_symv(&mut s, &version_set(2)).unwrap();

    let p = panel(&s, 1, 3);
    assert_eq!(
        labels(p),
        vec!["cublas atomics", "cublas", "MKL", "1.0.0 chemv", "1.1.0 chemv"]
    );
    assert_eq!(p.series[0].color, Rgb::GREY);
    assert_eq!(p.series[0].style.line, LineStyle::Dashed);
    assert_eq!(p.series[1].style.line, LineStyle::DashDot);
    assert_eq!(p.series[2].color, Rgb::BLACK);
    assert_close(&ys(p, "MKL"), &[5.0, 10.0, 15.0]);
    assert_close(&ys(p, "1.1.0 chemv"), &[20.0, 40.0, 60.0]);
    assert_eq!(labels(panel(&s, 1, 4))[3], "1.0.0 zhemv");
}

#[test]
fn dispatch_covers_every_routine() {
    let versions = version_set(2);
    for routine in Routine::ALL {
        let mut s = PlotSession::default();
        routines::plot(&mut s, routine, &versions, &RoutineOptions::default()).unwrap();
        let figures = s.take_figures();
        assert!(!figures.is_empty(), "{routine} produced no figures");
        assert!(figures.iter().all(|f| !f.is_empty()), "{routine} left an empty figure");
    }
}

#[test]
fn single_table_curve_helper() {
    let mut s = PlotSession::default();
    routines::factorization_data(
        &mut s,
        &routines::GEQRF,
        "sgeqrf",
        &mn_factor_table(10.0),
        "x-",
        Rgb::BLACK,
        None,
    )
    .unwrap();
    assert_eq!(s.axes().series.len(), 1);
    assert_eq!(s.axes().series[0].style.marker, Marker::Cross);
}

#[test]
fn symv_references_per_panel() {
    let full = full_version("1.6.0", 20.0, false);
    let mut partial = Version::new("1.5.0");
    for name in ["ssymv", "chemv", "zhemv"] {
        partial.insert_table(name, full.table(name).unwrap().clone());
    }
    let versions = VersionSet::new(vec![partial, full]);

    let mut s = PlotSession::default();
    plot_symv(&mut s, &versions).unwrap();

    assert_eq!(
        labels(panel(&s, 1, 1)),
        vec!["cublas atomics", "cublas", "MKL", "1.5.0 ssymv", "1.6.0 ssymv"]
    );
    // 1.5.0 has no dsymv, so 1.6.0 supplies the references there
    assert_eq!(
        labels(panel(&s, 1, 2)),
        vec!["cublas atomics", "cublas", "MKL", "1.6.0 dsymv"]
    );
    assert_close(&ys(panel(&s, 1, 2), "MKL"), &[10.0, 20.0, 30.0]);
}
