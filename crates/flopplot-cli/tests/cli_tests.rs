use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use flopplot_cli::{
    banner, build_cli, file_prefix, is_verbose, load_versions, parse_ratio, run_plot,
    PlotRequest,
};
use flopplot_data::ResultTable;
use flopplot_render::{
    Figure, OutputFormat, PlotConfig, RenderError, Renderer, Routine, RoutineOptions,
};
use flopplot_test_utils::{full_version, version_json};
use pretty_assertions::assert_eq;

fn plot_args(argv: &[&str]) -> ArgMatches {
    let mut full = vec!["flopplot", "plot"];
    full.extend_from_slice(argv);
    let matches = build_cli().try_get_matches_from(full).unwrap();
    let (name, args) = matches.subcommand().unwrap();
    assert_eq!(name, "plot");
    args.clone()
}

fn request(argv: &[&str]) -> PlotRequest {
    PlotRequest::from_matches(&plot_args(argv)).unwrap()
}

/// Data directory with one JSON file per version
fn data_dir(names: &[(&str, f64)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (i, &(name, speed)) in names.iter().enumerate() {
        let v = full_version(name, speed, i == 0);
        let tables: Vec<(&str, &ResultTable)> = v
            .table_names()
            .filter_map(|t| v.table(t).map(|table| (t, table)))
            .collect();
        fs::write(
            dir.path().join(format!("{i:02}_{name}.json")),
            version_json(name, &tables),
        )
        .unwrap();
    }
    dir
}

#[derive(Default)]
struct Recording {
    ids: RefCell<Vec<u32>>,
}

impl Renderer for Recording {
    fn extension(&self) -> &'static str {
        "out"
    }

    fn render(&self, figure: &Figure, path: &Path) -> Result<(), RenderError> {
        self.ids.borrow_mut().push(figure.id());
        fs::write(path, "").map_err(|source| RenderError::Io {
            path: path.into(),
            source,
        })
    }
}

#[test]
fn command_is_well_formed() {
    build_cli().debug_assert();
}

#[test]
fn plot_defaults() {
    let r = request(&["getrf"]);
    assert_eq!(r.routines, vec![Routine::Getrf]);
    assert_eq!(r.options, RoutineOptions::default());
    assert_eq!(r.config, PlotConfig::default());
    assert!(r.select.is_empty());
}

#[test]
fn all_expands_to_every_routine() {
    assert_eq!(request(&["all"]).routines, Routine::ALL.to_vec());
}

#[test]
fn unknown_routine_rejected() {
    assert!(build_cli()
        .try_get_matches_from(["flopplot", "plot", "trsm"])
        .is_err());
}

#[test]
fn flags_map_to_options() {
    let r = request(&[
        "syev",
        "--no-bulge",
        "--no-lapack",
        "--separate",
        "--format",
        "png",
        "--out",
        "charts",
        "--data",
        "results",
        "--versions",
        "1.5.0,trunk",
        "--ratio",
        "1/100",
    ]);
    assert!(r.options.syev.classic);
    assert!(r.options.syev.classic_gpu);
    assert!(!r.options.syev.bulge);
    assert!(!r.options.syev.lapack);
    assert!((r.options.ratio - 0.01).abs() < 1e-12);
    assert!(!r.config.subplots);
    assert_eq!(r.config.format, OutputFormat::Png);
    assert_eq!(r.config.output_dir, PathBuf::from("charts"));
    assert_eq!(r.config.data_dir, PathBuf::from("results"));
    assert_eq!(r.select, vec!["1.5.0".to_string(), "trunk".to_string()]);
}

#[test]
fn command_line_wins_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flopplot.toml");
    fs::write(
        &path,
        "format = \"png\"\noutput_dir = \"from-config\"\ndpi = 150\n",
    )
    .unwrap();

    let r = request(&["geev", "--config", path.to_str().unwrap(), "--out", "cli"]);
    assert_eq!(r.config.format, OutputFormat::Png);
    assert_eq!(r.config.dpi, 150);
    assert_eq!(r.config.output_dir, PathBuf::from("cli"));
}

#[test]
fn bad_config_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flopplot.toml");
    fs::write(&path, "dpi = 0\n").unwrap();

    let err = PlotRequest::from_matches(&plot_args(&["geev", "--config", path.to_str().unwrap()]))
        .unwrap_err();
    assert!(format!("{err:#}").contains("dpi"));
}

#[test]
fn ratio_parsing() {
    assert_eq!(parse_ratio("3").unwrap(), 3.0);
    assert_eq!(parse_ratio("1/3").unwrap(), 1.0 / 3.0);
    assert_eq!(parse_ratio(" 100 ").unwrap(), 100.0);
    for bad in ["0", "-1", "1/0", "x", "1/x", ""] {
        assert!(parse_ratio(bad).is_err(), "{bad:?} accepted");
    }
    assert!(build_cli()
        .try_get_matches_from(["flopplot", "plot", "gesvd", "--ratio", "0"])
        .is_err());
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["flopplot", "list", "-v"])
        .unwrap();
    assert!(is_verbose(&m));
    let m = build_cli().try_get_matches_from(["flopplot", "list"]).unwrap();
    assert!(!is_verbose(&m));
}

#[test]
fn svd_prefix_carries_ratio() {
    let square = RoutineOptions::default();
    let tall = RoutineOptions {
        ratio: 3.0,
        ..RoutineOptions::default()
    };
    assert_eq!(file_prefix(Routine::Gesvd, &square), "gesvd");
    assert_eq!(file_prefix(Routine::Gesdd, &tall), "gesdd_ratio3");
    assert_eq!(file_prefix(Routine::Getrf, &tall), "getrf");
}

#[test]
fn versions_load_in_file_order_and_select() {
    let dir = data_dir(&[("1.5.0", 10.0), ("1.6.0", 20.0), ("trunk", 30.0)]);
    let config = PlotConfig::new().with_data_dir(dir.path());

    let all = load_versions(&config, &[]).unwrap();
    assert_eq!(all.names(), vec!["1.5.0", "1.6.0", "trunk"]);

    let some = load_versions(&config, &["trunk".into(), "1.5.0".into()]).unwrap();
    assert_eq!(some.names(), vec!["1.5.0", "trunk"]);

    let err = load_versions(&config, &["2.0".into()]).unwrap_err();
    assert!(err.to_string().contains("2.0"));
}

#[test]
fn empty_data_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlotConfig::new().with_data_dir(dir.path());
    assert!(load_versions(&config, &[]).is_err());

    let missing = PlotConfig::new().with_data_dir(dir.path().join("nope"));
    let err = load_versions(&missing, &[]).unwrap_err();
    assert!(format!("{err:#}").contains("loading results"));
}

#[test]
fn banner_lists_plots_and_versions() {
    let dir = data_dir(&[("1.5.0", 10.0), ("trunk", 20.0)]);
    let versions = load_versions(&PlotConfig::new().with_data_dir(dir.path()), &[]).unwrap();
    let text = banner(&versions);

    assert!(text.starts_with("Available plots:\n"));
    assert!(text.contains("flopplot plot gesvd  [--ratio R]"));
    assert!(text.contains("versions[0] = 1.5.0\nversions[1] = trunk\n"));
}

#[test]
fn plot_writes_every_figure() {
    let data = data_dir(&[("1.5.0", 10.0), ("1.6.0", 20.0)]);
    let out = tempfile::tempdir().unwrap();
    let out_dir = out.path().to_str().unwrap();

    let mut r = request(&["syev", "--out", out_dir]);
    r.config = r.config.with_data_dir(data.path());
    let versions = load_versions(&r.config, &r.select).unwrap();
    let renderer = Recording::default();

    let written = run_plot(&r, &versions, &renderer).unwrap();
    assert_eq!(
        written,
        vec![out.path().join("syev_fig1.out"), out.path().join("syev_fig2.out")]
    );
    assert!(written.iter().all(|p| p.exists()));
    assert_eq!(*renderer.ids.borrow(), vec![1, 2]);
}

#[test]
fn plot_all_separate() {
    let data = data_dir(&[("1.6.0", 20.0)]);
    let out = tempfile::tempdir().unwrap();

    let mut r = request(&["all", "--separate", "--ratio", "3"]);
    r.config = r
        .config
        .with_data_dir(data.path())
        .with_output_dir(out.path());
    let versions = load_versions(&r.config, &r.select).unwrap();

    let written = run_plot(&r, &versions, &Recording::default()).unwrap();
    let has = |name: &str| written.contains(&out.path().join(name));
    assert!(has("symv_fig14.out"));
    assert!(has("geev_fig24.out"));
    assert!(has("gesvd_ratio3_fig21.out"));
    assert!(has("gesdd_ratio3_fig41.out"));
    assert!(!has("getrf_fig1.out"));
}

#[test]
fn layout_flags_override_config_both_ways() {
    let dir = tempfile::tempdir().unwrap();
    let separate = dir.path().join("separate.yaml");
    fs::write(&separate, "subplots: false\n").unwrap();
    let combined = dir.path().join("combined.json");
    fs::write(&combined, r#"{"subplots": true}"#).unwrap();

    assert!(!request(&["getrf", "--config", separate.to_str().unwrap()]).config.subplots);
    assert!(request(&["getrf", "--config", separate.to_str().unwrap(), "--combined"]).config.subplots);
    assert!(!request(&["getrf", "--config", combined.to_str().unwrap(), "--separate"]).config.subplots);

    assert!(build_cli()
        .try_get_matches_from(["flopplot", "plot", "getrf", "--separate", "--combined"])
        .is_err());
}
