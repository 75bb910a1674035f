//! flopplot Render
//!
//! Version-over-version GFLOP/s charts for dense linear-algebra routines.
//!
//! # Core Concepts
//!
//! - [`PlotSession`]: figure/subplot layout, combined or one figure per panel
//! - [`Figure`], [`Axes`], [`Series`]: in-memory chart model
//! - [`routines`]: `*_data`, `*_labels` and `plot_*` per routine family
//! - [`Renderer`]: figure to file; [`PlottersRenderer`] writes SVG or PNG
//! - [`PlotConfig`]: figure size, resolution, layout mode, directories
//!
//! # Example
//!
//! ```rust,ignore
//! use flopplot_render::{routines, PlotSession, PlottersRenderer, OutputFormat};
//!
//! let mut session = PlotSession::new(true);
//! routines::plot_getrf(&mut session, &versions)?;
//! let figures = session.take_figures();
//! let renderer = PlottersRenderer::new(OutputFormat::Svg);
//! flopplot_render::write_figures(&figures, "plots".as_ref(), "getrf", &renderer)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod routines;
pub mod session;
pub mod style;

pub use backend::{write_figures, PlottersRenderer, Renderer};
pub use config::{OutputFormat, PlotConfig};
pub use error::{ConfigError, LayoutError, PlotError, RenderError, StyleError};
pub use model::{Axes, Figure, LegendPosition, Series};
pub use routines::{plot, Routine, RoutineOptions, SyevOptions};
pub use session::PlotSession;
pub use style::{FormatSpec, LineStyle, Marker, SeriesStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
