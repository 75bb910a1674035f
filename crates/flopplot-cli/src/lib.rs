//! flopplot command line
//!
//! Argument parsing, configuration merging and dispatch for the `flopplot`
//! binary. Kept as a library so the command can be exercised from tests
//! without spawning a process.
//!
//! # Example
//!
//! ```rust,ignore
//! let matches = flopplot_cli::build_cli().get_matches_from(["flopplot", "plot", "syev"]);
//! let (_, args) = matches.subcommand().unwrap();
//! let request = PlotRequest::from_matches(args)?;
//! let versions = load_versions(&request.config, &request.select)?;
//! run_plot(&request, &versions, &PlottersRenderer::from_config(&request.config))?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use flopplot_data::{loader, VersionSet};
use flopplot_render::format::format_g;
use flopplot_render::{
    routines, write_figures, OutputFormat, PlotConfig, PlotSession, Renderer, Routine,
    RoutineOptions, SyevOptions,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Positional value that plots every routine
pub const ALL_ROUTINES: &str = "all";

/// Build the `flopplot` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("flopplot")
        .version(flopplot_render::VERSION)
        .about("Compare GFLOP/s of linear-algebra routines across library versions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (RUST_LOG is ignored)"),
        )
        .subcommand(
            Command::new("list")
                .about("List available plots and loaded versions")
                .args(source_args()),
        )
        .subcommand(
            Command::new("plot")
                .about("Plot one routine family, or all of them")
                .arg(
                    Arg::new("routine")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(
                            Routine::ALL.iter().map(|r| r.name()).chain([ALL_ROUTINES]),
                        ))
                        .help("Routine family to plot"),
                )
                .args(source_args())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory [config: output_dir]"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["svg", "png"])
                        .help("Image format [config: format]"),
                )
                .arg(
                    Arg::new("separate")
                        .long("separate")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("combined")
                        .help("One figure per panel [config: subplots = false]"),
                )
                .arg(
                    Arg::new("combined")
                        .long("combined")
                        .action(ArgAction::SetTrue)
                        .help("All panels in one figure [config: subplots = true]"),
                )
                .arg(
                    Arg::new("ratio")
                        .long("ratio")
                        .default_value("1")
                        .value_parser(parse_ratio)
                        .help("SVD M:N ratio, e.g. 3 or 1/3"),
                )
                .arg(
                    Arg::new("no-classic")
                        .long("no-classic")
                        .action(ArgAction::SetTrue)
                        .help("syev: skip the classic driver"),
                )
                .arg(
                    Arg::new("no-classic-gpu")
                        .long("no-classic-gpu")
                        .action(ArgAction::SetTrue)
                        .help("syev: skip the classic driver's GPU interface"),
                )
                .arg(
                    Arg::new("no-bulge")
                        .long("no-bulge")
                        .action(ArgAction::SetTrue)
                        .help("syev: skip the 2-stage driver"),
                )
                .arg(
                    Arg::new("no-lapack")
                        .long("no-lapack")
                        .action(ArgAction::SetTrue)
                        .help("syev: skip the LAPACK reference"),
                )
                .arg(
                    Arg::new("versions")
                        .long("versions")
                        .value_delimiter(',')
                        .help("Only plot these versions, e.g. 1.6.0,trunk"),
                ),
        )
}

fn source_args() -> [Arg; 2] {
    [
        Arg::new("data")
            .long("data")
            .short('d')
            .value_parser(value_parser!(PathBuf))
            .help("Directory of version result files [config: data_dir]"),
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML, YAML or JSON configuration file"),
    ]
}

/// Parse an M:N ratio given as a number or a fraction such as `1/100`
///
/// # Errors
/// Returns a message for malformed, non-finite or non-positive ratios.
pub fn parse_ratio(s: &str) -> Result<f64, String> {
    let number = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid ratio {s:?}: {e}"))
    };
    let ratio = match s.split_once('/') {
        Some((num, den)) => number(num)? / number(den)?,
        None => number(s)?,
    };
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(format!("ratio must be positive, got {s:?}"));
    }
    Ok(ratio)
}

/// Was `-v` given anywhere on the command line
#[must_use]
pub fn is_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub)| sub.get_flag("verbose"))
}

/// Install the global `tracing` subscriber, logging to stderr
///
/// `RUST_LOG` is honoured, defaulting to `info`; `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration file (if any) overlaid with `--data`
///
/// # Errors
/// Fails if the configuration file cannot be loaded.
pub fn config_from_matches(args: &ArgMatches) -> Result<PlotConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlotConfig::new(),
    };
    if let Some(dir) = args.get_one::<PathBuf>("data") {
        config = config.with_data_dir(dir.clone());
    }
    Ok(config)
}

/// Everything `flopplot plot` needs
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub routines: Vec<Routine>,
    pub options: RoutineOptions,
    pub config: PlotConfig,
    /// Version names to keep; empty keeps all
    pub select: Vec<String>,
}

impl PlotRequest {
    /// Read the `plot` subcommand's arguments
    ///
    /// Command line flags win over the configuration file.
    ///
    /// # Errors
    /// Fails on an unloadable configuration file or unknown routine.
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let routine = args
            .get_one::<String>("routine")
            .map(String::as_str)
            .unwrap_or(ALL_ROUTINES);
        let routines = if routine == ALL_ROUTINES {
            Routine::ALL.to_vec()
        } else {
            vec![routine.parse::<Routine>().map_err(anyhow::Error::msg)?]
        };

        let mut config = config_from_matches(args)?;
        if let Some(dir) = args.get_one::<PathBuf>("out") {
            config = config.with_output_dir(dir.clone());
        }
        if let Some(format) = args.get_one::<String>("format") {
            config = config.with_format(format.parse::<OutputFormat>()?);
        }
        if args.get_flag("separate") {
            config = config.with_subplots(false);
        } else if args.get_flag("combined") {
            config = config.with_subplots(true);
        }

        let options = RoutineOptions {
            ratio: args.get_one::<f64>("ratio").copied().unwrap_or(1.0),
            syev: SyevOptions {
                classic: !args.get_flag("no-classic"),
                classic_gpu: !args.get_flag("no-classic-gpu"),
                bulge: !args.get_flag("no-bulge"),
                lapack: !args.get_flag("no-lapack"),
            },
        };

        let select = args
            .get_many::<String>("versions")
            .map(|names| names.cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            routines,
            options,
            config,
            select,
        })
    }
}

/// Load the configured data directory, then keep only `select` (if given)
///
/// # Errors
/// Fails if the directory cannot be loaded, holds no versions, or `select`
/// names a version that was not loaded.
pub fn load_versions(config: &PlotConfig, select: &[String]) -> Result<VersionSet> {
    let dir = &config.data_dir;
    let versions = loader::load_dir(dir, &config.order)
        .with_context(|| format!("loading results from {}", dir.display()))?;
    if versions.is_empty() {
        bail!("no version result files in {}", dir.display());
    }
    info!(dir = %dir.display(), versions = versions.len(), "loaded results");
    for v in &versions {
        debug!(version = v.name(), color = %v.color(), "version color");
    }

    if select.is_empty() {
        return Ok(versions);
    }
    if let Some(missing) = select.iter().find(|name| versions.find(name).is_none()) {
        bail!(
            "version {missing} not found, have: {}",
            versions.names().join(", ")
        );
    }
    let names: Vec<&str> = select.iter().map(String::as_str).collect();
    Ok(versions.select(&names))
}

/// File name prefix for a routine's figures
///
/// SVD plots carry the ratio when it is not square so runs with different
/// ratios do not overwrite each other.
#[must_use]
pub fn file_prefix(routine: Routine, options: &RoutineOptions) -> String {
    let svd = matches!(routine, Routine::Gesvd | Routine::Gesdd);
    if svd && options.ratio != 1.0 {
        format!("{routine}_ratio{}", format_g(options.ratio, 3))
    } else {
        routine.name().to_string()
    }
}

/// Plot every requested routine and write its figures
///
/// # Errors
/// Fails on the first routine that cannot be plotted or written.
pub fn run_plot(
    request: &PlotRequest,
    versions: &VersionSet,
    renderer: &dyn Renderer,
) -> Result<Vec<PathBuf>> {
    let config = &request.config;
    let mut written = Vec::new();
    for &routine in &request.routines {
        let mut session = PlotSession::new(config.subplots).with_figsize(config.figsize);
        routines::plot(&mut session, routine, versions, &request.options)
            .with_context(|| format!("plotting {routine}"))?;

        let figures = session.take_figures();
        debug!(%routine, figures = figures.len(), "plotted");
        let prefix = file_prefix(routine, &request.options);
        let paths = write_figures(&figures, &config.output_dir, &prefix, renderer)
            .with_context(|| format!("writing {routine} figures"))?;
        written.extend(paths);
    }
    Ok(written)
}

/// Available plots and loaded versions
#[must_use]
pub fn banner(versions: &VersionSet) -> String {
    let mut out = String::from("Available plots:\n");
    for routine in Routine::ALL {
        let _ = writeln!(out, "  flopplot plot {}", routine.usage());
    }
    let _ = writeln!(out, "  flopplot plot {ALL_ROUTINES}\n\nAvailable versions:");
    for (i, v) in versions.iter().enumerate() {
        let _ = writeln!(out, "versions[{i}] = {}", v.name());
    }
    out
}
