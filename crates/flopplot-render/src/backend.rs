//! Static chart output
//!
//! [`Renderer`] is the seam between the figure model and image files.
//! [`PlottersRenderer`] draws with `plotters` to SVG or PNG.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{OutputFormat, PlotConfig};
use crate::error::RenderError;
use crate::format::tick_label;
use crate::model::{Axes, Figure, LegendPosition};
use crate::style::{LineStyle, Marker};

/// Turns a figure into a file
pub trait Renderer {
    /// File extension, without the dot
    fn extension(&self) -> &'static str;

    /// Draw `figure` to `path`
    ///
    /// # Errors
    /// Returns [`RenderError`] if drawing or writing fails.
    fn render(&self, figure: &Figure, path: &Path) -> Result<(), RenderError>;
}

/// `plotters`-backed renderer
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    format: OutputFormat,
    dpi: u32,
    legend_font_size: u32,
}

impl PlottersRenderer {
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            dpi: 100,
            legend_font_size: 10,
        }
    }

    #[must_use]
    pub fn from_config(config: &PlotConfig) -> Self {
        Self {
            format: config.format,
            dpi: config.dpi,
            legend_font_size: config.legend_font_size,
        }
    }

    /// Canvas size in pixels for a figure
    #[must_use]
    pub fn pixel_size(&self, figure: &Figure) -> (u32, u32) {
        let (w, h) = figure.size();
        let px = |inches: f64| (inches * f64::from(self.dpi)).round().max(1.0) as u32;
        (px(w), px(h))
    }

    fn draw_figure<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(backend_err)?;
        let panels = root.split_evenly(figure.grid());
        for axes in figure.axes() {
            match panels.get(axes.index.wrapping_sub(1)) {
                Some(area) => self.draw_axes(axes, area)?,
                None => warn!(figure = figure.id(), index = axes.index, "axes outside grid"),
            }
        }
        root.present().map_err(backend_err)?;
        Ok(())
    }

    fn draw_axes<DB: DrawingBackend>(
        &self,
        axes: &Axes,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let (x0, x1) = axes.x_range();
        let y1 = y_limit(axes);

        let mut builder = ChartBuilder::on(area);
        builder.margin(10).x_label_area_size(35).y_label_area_size(55);
        if let Some(title) = &axes.title {
            builder.caption(title, ("sans-serif", 16.0));
        }
        let x_spec = (x0..x1)
            .log_scale()
            .with_key_points(key_points(&axes.x_ticks, x0, x1));
        let mut chart = builder
            .build_cartesian_2d(x_spec, 0.0..y1)
            .map_err(backend_err)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&format_tick)
            .label_style(("sans-serif", 12.0))
            .axis_desc_style(("sans-serif", 13.0));
        if let Some(label) = &axes.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &axes.y_label {
            mesh.y_desc(label.as_str());
        }
        if !axes.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(backend_err)?;

        for series in &axes.series {
            let (r, g, b) = series.color.to_u8();
            let color = RGBColor(r, g, b);
            let line = color.stroke_width(2);

            for segment in series.segments() {
                let points = segment.iter().copied();
                match series.style.line {
                    LineStyle::None => {}
                    LineStyle::Solid => {
                        chart
                            .draw_series(LineSeries::new(points.clone(), line))
                            .map_err(backend_err)?;
                    }
                    LineStyle::Dashed => {
                        chart
                            .draw_series(DashedLineSeries::new(points.clone(), 8, 5, line))
                            .map_err(backend_err)?;
                    }
                    LineStyle::DashDot => {
                        chart
                            .draw_series(DashedLineSeries::new(points.clone(), 12, 4, line))
                            .map_err(backend_err)?;
                        chart
                            .draw_series(DashedLineSeries::new(points.clone(), 2, 14, line))
                            .map_err(backend_err)?;
                    }
                    LineStyle::Dotted => {
                        chart
                            .draw_series(DashedLineSeries::new(points.clone(), 2, 4, line))
                            .map_err(backend_err)?;
                    }
                }

                match series.style.marker {
                    Marker::None => {}
                    Marker::Point => {
                        chart
                            .draw_series(points.map(|p| Circle::new(p, 3, color.filled())))
                            .map_err(backend_err)?;
                    }
                    Marker::Circle => {
                        chart
                            .draw_series(points.map(|p| Circle::new(p, 4, line)))
                            .map_err(backend_err)?;
                    }
                    Marker::Cross => {
                        chart
                            .draw_series(points.map(|p| Cross::new(p, 4, line)))
                            .map_err(backend_err)?;
                    }
                    Marker::Square => {
                        chart
                            .draw_series(points.map(|p| {
                                EmptyElement::at(p)
                                    + Rectangle::new([(-3, -3), (3, 3)], color.filled())
                            }))
                            .map_err(backend_err)?;
                    }
                    Marker::Plus => {
                        chart
                            .draw_series(points.clone().map(|p| {
                                EmptyElement::at(p) + PathElement::new(vec![(-5, 0), (5, 0)], line)
                            }))
                            .map_err(backend_err)?;
                        chart
                            .draw_series(points.map(|p| {
                                EmptyElement::at(p) + PathElement::new(vec![(0, -5), (0, 5)], line)
                            }))
                            .map_err(backend_err)?;
                    }
                }
            }

            // legend entry, drawn even when every point is missing
            if let Some(label) = &series.label {
                chart
                    .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), line))
                    .map_err(backend_err)?
                    .label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
            }
        }

        if let Some(position) = axes.legend {
            if axes.labels().next().is_some() {
                chart
                    .configure_series_labels()
                    .position(label_position(position))
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .label_font(("sans-serif", f64::from(self.legend_font_size)))
                    .draw()
                    .map_err(backend_err)?;
            }
        }
        Ok(())
    }
}

impl Renderer for PlottersRenderer {
    fn extension(&self) -> &'static str {
        self.format.extension()
    }

    fn render(&self, figure: &Figure, path: &Path) -> Result<(), RenderError> {
        let dims = self.pixel_size(figure);
        debug!(figure = figure.id(), width = dims.0, height = dims.1, "render");
        match self.format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, dims).into_drawing_area();
                self.draw_figure(figure, &root)
            }
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, dims).into_drawing_area();
                self.draw_figure(figure, &root)
            }
        }
    }
}

/// Write one file per figure as `<prefix>_fig<id>.<ext>` under `out_dir`
///
/// # Errors
/// Returns [`RenderError::Io`] if `out_dir` cannot be created, or the first
/// render failure.
pub fn write_figures(
    figures: &[Figure],
    out_dir: &Path,
    prefix: &str,
    renderer: &dyn Renderer,
) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(out_dir).map_err(|source| RenderError::Io {
        path: out_dir.into(),
        source,
    })?;

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        if figure.is_empty() {
            warn!(figure = figure.id(), prefix, "figure has no data");
        }
        let path = out_dir.join(format!(
            "{prefix}_fig{}.{}",
            figure.id(),
            renderer.extension()
        ));
        renderer.render(figure, &path)?;
        info!(path = %path.display(), "wrote figure");
        written.push(path);
    }
    Ok(written)
}

/// Top of the linear Y axis: 10% headroom over the largest plottable value
///
/// Axes with nothing plottable (or nothing above zero) get `1.0`.
fn y_limit(axes: &Axes) -> f64 {
    axes.y_max().filter(|y| *y > 0.0).map_or(1.0, |y| y * 1.1)
}

/// Tick positions inside the range; decades when none are given
fn key_points(ticks: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    let inside: Vec<f64> = ticks
        .iter()
        .copied()
        .filter(|t| *t >= lo && *t <= hi)
        .collect();
    if !inside.is_empty() {
        return inside;
    }
    let first = lo.log10().ceil() as i32;
    let last = hi.log10().floor() as i32;
    (first..=last).map(|e| 10f64.powi(e)).collect()
}

fn format_tick(x: &f64) -> String {
    tick_label(*x)
}

fn label_position(position: LegendPosition) -> SeriesLabelPosition {
    match position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

fn backend_err<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Backend(err.to_string())
}
