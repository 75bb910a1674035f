//! Series styles and compact format strings
//!
//! A format string combines an optional color code, a marker and a line
//! style, e.g. `".-"`, `"x-"`, `"k+-"`, `"k--"`. A format with a marker but
//! no line style draws markers only; a format with neither draws a solid line.

use std::str::FromStr;

use flopplot_data::Rgb;

use crate::error::StyleError;

/// Point marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    /// `.`
    Point,
    /// `o`
    Circle,
    /// `x`
    Cross,
    /// `+`
    Plus,
    /// `s`
    Square,
}

/// Line pattern between points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `-.`
    DashDot,
    /// `:`
    Dotted,
    /// Markers only
    None,
}

/// How one series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesStyle {
    pub marker: Marker,
    pub line: LineStyle,
}

impl SeriesStyle {
    #[inline]
    #[must_use]
    pub const fn new(marker: Marker, line: LineStyle) -> Self {
        Self { marker, line }
    }

    /// Whether a connecting line is drawn
    #[inline]
    #[must_use]
    pub fn has_line(self) -> bool {
        self.line != LineStyle::None
    }
}

/// Parsed format string: style plus optional color code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatSpec {
    pub style: SeriesStyle,
    pub color: Option<Rgb>,
}

impl FromStr for FormatSpec {
    type Err = StyleError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        let dup = |what| StyleError::Duplicate {
            what,
            format: format.to_string(),
        };

        let mut marker = None;
        let mut line = None;
        let mut color = None;
        let mut chars = format.chars().peekable();

        while let Some(ch) = chars.next() {
            let parsed_line = match ch {
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    Some(LineStyle::Dashed)
                }
                '-' if chars.peek() == Some(&'.') => {
                    chars.next();
                    Some(LineStyle::DashDot)
                }
                '-' => Some(LineStyle::Solid),
                ':' => Some(LineStyle::Dotted),
                _ => None,
            };
            if let Some(l) = parsed_line {
                if line.replace(l).is_some() {
                    return Err(dup("line style"));
                }
                continue;
            }

            let parsed_marker = match ch {
                '.' => Some(Marker::Point),
                'o' => Some(Marker::Circle),
                'x' => Some(Marker::Cross),
                '+' => Some(Marker::Plus),
                's' => Some(Marker::Square),
                _ => None,
            };
            if let Some(m) = parsed_marker {
                if marker.replace(m).is_some() {
                    return Err(dup("marker"));
                }
                continue;
            }

            match Rgb::from_code(ch) {
                Some(c) => {
                    if color.replace(c).is_some() {
                        return Err(dup("color"));
                    }
                }
                None => {
                    return Err(StyleError::UnknownChar {
                        ch,
                        format: format.to_string(),
                    })
                }
            }
        }

        let marker = marker.unwrap_or_default();
        let line = line.unwrap_or(if marker == Marker::None {
            LineStyle::Solid
        } else {
            LineStyle::None
        });

        Ok(Self {
            style: SeriesStyle::new(marker, line),
            color,
        })
    }
}
