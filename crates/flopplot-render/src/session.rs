//! Figure and subplot layout
//!
//! A [`PlotSession`] decides where curves land. In combined mode (the
//! default) a plot of `rows x cols` panels is one figure. In separate mode
//! every panel becomes its own figure, numbered `figure * 10 + index`, so
//! each routine/precision can be saved on its own.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = PlotSession::new(true);
//! session.figure(1);
//! session.clf(2, 2)?;
//! session.subplot(2, 2, 3)?;
//! session.semilogx(points, ".-", Some(color), Some("1.6.0 cgetrf".into()))?;
//! session.resize(session.figsize(), 2, 2)?;
//! ```

use std::collections::BTreeMap;

use flopplot_data::Rgb;
use tracing::trace;

use crate::error::{LayoutError, PlotError};
use crate::model::{Axes, Figure, Series};
use crate::style::FormatSpec;

/// Default figure size in inches
pub const DEFAULT_FIGSIZE: (f64, f64) = (9.0, 7.0);

/// Figure bookkeeping for one plotting run
#[derive(Debug, Clone)]
pub struct PlotSession {
    subplots: bool,
    figsize: (f64, f64),
    /// Figure number most recently passed to [`figure`](Self::figure)
    figure_number: Option<u32>,
    /// Figure that drawing calls go to
    active: Option<u32>,
    figures: BTreeMap<u32, Figure>,
}

impl Default for PlotSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PlotSession {
    /// `subplots = true` puts every panel of a plot in one figure
    #[must_use]
    pub fn new(subplots: bool) -> Self {
        Self {
            subplots,
            figsize: DEFAULT_FIGSIZE,
            figure_number: None,
            active: None,
            figures: BTreeMap::new(),
        }
    }

    /// Size applied by plot functions when they finish a figure
    #[inline]
    #[must_use]
    pub fn with_figsize(mut self, figsize: (f64, f64)) -> Self {
        self.figsize = figsize;
        self
    }

    #[inline]
    #[must_use]
    pub fn figsize(&self) -> (f64, f64) {
        self.figsize
    }

    #[inline]
    #[must_use]
    pub fn subplots(&self) -> bool {
        self.subplots
    }

    /// Start figure `fig`
    ///
    /// Combined mode selects the figure right away; separate mode only
    /// remembers the number for the following [`subplot`](Self::subplot) calls.
    pub fn figure(&mut self, fig: u32) {
        self.figure_number = Some(fig);
        if self.subplots {
            self.select_figure(fig);
        }
    }

    /// Clear the figure(s) of a `rows x cols` plot
    ///
    /// # Errors
    /// Propagates subplot selection errors in separate mode.
    pub fn clf(&mut self, rows: usize, cols: usize) -> Result<(), LayoutError> {
        if self.subplots || rows == 0 || cols == 0 {
            self.current_figure().clear();
            return Ok(());
        }
        for index in 1..=rows * cols {
            self.subplot(rows, cols, index)?;
            self.current_figure().clear();
        }
        Ok(())
    }

    /// Select panel `index` (1-based, row-major) of a `rows x cols` grid
    ///
    /// # Errors
    /// Returns [`LayoutError`] for an empty grid or an index outside
    /// `1..=rows*cols`.
    pub fn subplot(&mut self, rows: usize, cols: usize, index: usize) -> Result<(), LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::EmptyGrid { rows, cols });
        }
        if index == 0 || index > rows * cols {
            return Err(LayoutError::IndexOutOfRange {
                index,
                max: rows * cols,
            });
        }

        if self.subplots {
            self.current_figure().select_axes(rows, cols, index);
        } else {
            let id = self.figure_number.unwrap_or(1) * 10 + index as u32;
            self.select_figure(id).current_axes();
        }
        Ok(())
    }

    /// Set the size of the figure(s) of a `rows x cols` plot
    ///
    /// Separate mode splits `size` so each panel figure gets one grid cell's share.
    ///
    /// # Errors
    /// Propagates subplot selection errors in separate mode.
    pub fn resize(&mut self, size: (f64, f64), rows: usize, cols: usize) -> Result<(), LayoutError> {
        if self.subplots || rows == 0 || cols == 0 {
            self.current_figure().set_size(size);
            return Ok(());
        }
        let cell = (size.0 / cols as f64, size.1 / rows as f64);
        for index in 1..=rows * cols {
            self.subplot(rows, cols, index)?;
            self.current_figure().set_size(cell);
        }
        Ok(())
    }

    /// Add a curve with log-scaled X to the current axes
    ///
    /// `color` overrides any color code in `format`; with neither the curve
    /// is black.
    ///
    /// # Errors
    /// Returns [`PlotError::Style`] if `format` does not parse.
    pub fn semilogx(
        &mut self,
        points: Vec<(f64, f64)>,
        format: &str,
        color: Option<Rgb>,
        label: Option<String>,
    ) -> Result<(), PlotError> {
        let spec: FormatSpec = format.parse()?;
        let series = Series {
            label,
            style: spec.style,
            color: color.or(spec.color).unwrap_or(Rgb::BLACK),
            points,
        };
        trace!(
            figure = self.active,
            label = series.label.as_deref(),
            points = series.points.len(),
            "add series"
        );
        self.axes().series.push(series);
        Ok(())
    }

    /// Current axes of the current figure
    ///
    /// Like a fresh plotting state, this creates figure 1 with a single
    /// panel when nothing is selected yet.
    pub fn axes(&mut self) -> &mut Axes {
        self.current_figure().current_axes()
    }

    /// Figures produced so far, by id
    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.figures.values()
    }

    #[must_use]
    pub fn figure_by_id(&self, id: u32) -> Option<&Figure> {
        self.figures.get(&id)
    }

    /// Hand over all figures, by id, and reset the session
    pub fn take_figures(&mut self) -> Vec<Figure> {
        self.active = None;
        self.figure_number = None;
        std::mem::take(&mut self.figures).into_values().collect()
    }

    fn select_figure(&mut self, id: u32) -> &mut Figure {
        self.active = Some(id);
        let figsize = self.figsize;
        self.figures
            .entry(id)
            .or_insert_with(|| Figure::new(id, figsize))
    }

    fn current_figure(&mut self) -> &mut Figure {
        let id = self.active.unwrap_or(1);
        self.select_figure(id)
    }
}
