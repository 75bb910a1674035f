//! Figure model
//!
//! Plot functions build [`Figure`]s in memory; a
//! [`Renderer`](crate::backend::Renderer) turns them into files. Every X axis
//! is logarithmic (problem size) and every Y value is GFLOP/s.

use flopplot_data::Rgb;

use crate::style::SeriesStyle;

/// One curve
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub style: SeriesStyle,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Maximal runs of plottable points
    ///
    /// A point is plottable when both coordinates are finite and x is positive
    /// (log axis). Anything else breaks the curve, so missing measurements
    /// leave a gap instead of a bogus line.
    #[must_use]
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if is_plottable(x, y) {
                current.push((x, y));
            } else if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }

    /// Largest plottable y value
    #[must_use]
    pub fn y_max(&self) -> Option<f64> {
        self.points
            .iter()
            .filter(|&&(x, y)| is_plottable(x, y))
            .map(|&(_, y)| y)
            .reduce(f64::max)
    }
}

#[inline]
fn is_plottable(x: f64, y: f64) -> bool {
    x.is_finite() && y.is_finite() && x > 0.0
}

/// Legend placement inside the plot area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// One panel of a figure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    /// 1-based position in the figure grid, row-major
    pub index: usize,
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Labelled tick positions on the log X axis
    pub x_ticks: Vec<f64>,
    pub x_limits: Option<(f64, f64)>,
    pub grid: bool,
    pub legend: Option<LegendPosition>,
}

impl Axes {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Largest plottable y across all series
    #[must_use]
    pub fn y_max(&self) -> Option<f64> {
        self.series.iter().filter_map(Series::y_max).reduce(f64::max)
    }

    /// Series labels in draw order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().filter_map(|s| s.label.as_deref())
    }

    /// X range to draw: explicit limits, else the data extent
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        if let Some(limits) = self.x_limits {
            return limits;
        }
        let xs = self
            .series
            .iter()
            .flat_map(Series::segments)
            .flatten()
            .map(|(x, _)| x);
        let (lo, hi) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if lo.is_finite() && hi > lo {
            (lo, hi)
        } else if lo.is_finite() {
            (lo / 10.0, lo * 10.0)
        } else {
            (1.0, 10.0)
        }
    }
}

/// One output image: a grid of axes
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    id: u32,
    /// Width, height in inches
    size: (f64, f64),
    grid: (usize, usize),
    axes: Vec<Axes>,
    current: Option<usize>,
}

impl Figure {
    #[must_use]
    pub fn new(id: u32, size: (f64, f64)) -> Self {
        Self {
            id,
            size,
            grid: (1, 1),
            axes: Vec::new(),
            current: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[inline]
    pub fn set_size(&mut self, size: (f64, f64)) {
        self.size = size;
    }

    /// Rows, columns
    #[inline]
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    /// Axes sorted by index
    #[inline]
    #[must_use]
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    #[must_use]
    pub fn axes_at(&self, index: usize) -> Option<&Axes> {
        self.axes.iter().find(|a| a.index == index)
    }

    /// Select (creating if needed) axes `index` of a `rows x cols` grid
    ///
    /// Switching to a different grid shape drops axes that no longer fit.
    pub(crate) fn select_axes(&mut self, rows: usize, cols: usize, index: usize) -> &mut Axes {
        if self.grid != (rows, cols) {
            self.grid = (rows, cols);
            self.axes.retain(|a| a.index <= rows * cols);
        }
        let pos = match self.axes.binary_search_by_key(&index, |a| a.index) {
            Ok(pos) => pos,
            Err(pos) => {
                self.axes.insert(pos, Axes::new(index));
                pos
            }
        };
        self.current = Some(index);
        &mut self.axes[pos]
    }

    /// Current axes, creating a single full-figure axes if there is none
    pub(crate) fn current_axes(&mut self) -> &mut Axes {
        match self.current {
            Some(index) => {
                let (rows, cols) = self.grid;
                self.select_axes(rows, cols, index)
            }
            None => self.select_axes(1, 1, 1),
        }
    }

    /// Remove all axes; size is kept
    pub(crate) fn clear(&mut self) {
        self.axes.clear();
        self.grid = (1, 1);
        self.current = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.iter().all(|a| a.series.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SeriesStyle;

    fn series(points: Vec<(f64, f64)>) -> Series {
        Series {
            label: None,
            style: SeriesStyle::default(),
            color: Rgb::BLACK,
            points,
        }
    }

    #[test]
    fn nan_breaks_curve() {
        let s = series(vec![
            (10.0, 1.0),
            (20.0, 2.0),
            (30.0, f64::NAN),
            (40.0, 4.0),
            (0.0, 5.0),
        ]);
        assert_eq!(
            s.segments(),
            vec![vec![(10.0, 1.0), (20.0, 2.0)], vec![(40.0, 4.0)]]
        );
        assert_eq!(s.y_max(), Some(4.0));
    }

    #[test]
    fn all_nan_has_no_max() {
        let s = series(vec![(10.0, f64::NAN)]);
        assert!(s.segments().is_empty());
        assert_eq!(s.y_max(), None);
    }

    #[test]
    fn select_axes_keeps_order() {
        let mut f = Figure::new(1, (9.0, 7.0));
        f.select_axes(2, 2, 3);
        f.select_axes(2, 2, 1);
        f.select_axes(2, 2, 3);
        let idx: Vec<usize> = f.axes().iter().map(|a| a.index).collect();
        assert_eq!(idx, vec![1, 3]);
        assert_eq!(f.grid(), (2, 2));
    }

    #[test]
    fn current_axes_defaults_to_single_panel() {
        let mut f = Figure::new(7, (4.5, 3.5));
        f.current_axes().title = Some("t".into());
        assert_eq!(f.grid(), (1, 1));
        assert_eq!(f.axes_at(1).unwrap().title.as_deref(), Some("t"));
        f.clear();
        assert!(f.axes().is_empty());
        assert_eq!(f.size(), (4.5, 3.5));
    }

    #[test]
    fn x_range_prefers_limits() {
        let mut a = Axes::new(1);
        a.series.push(series(vec![(100.0, 1.0), (1000.0, 2.0)]));
        assert_eq!(a.x_range(), (100.0, 1000.0));
        a.x_limits = Some((9.0, 20000.0));
        assert_eq!(a.x_range(), (9.0, 20000.0));
    }
}
