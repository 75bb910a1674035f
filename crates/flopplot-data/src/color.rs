//! Version colors
//!
//! Versions are spread across a rainbow ramp: purple for the oldest,
//! red for the newest.

use std::f64::consts::PI;
use std::fmt;

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// `#aaaaaa`, used for vendor reference curves
    pub const GREY: Self = Self::new(170.0 / 255.0, 170.0 / 255.0, 170.0 / 255.0);

    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Single-letter color codes (`k`, `r`, `g`, `b`, `c`, `m`, `y`, `w`)
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        let c = match code {
            'k' => Self::BLACK,
            'w' => Self::WHITE,
            'r' => Self::new(1.0, 0.0, 0.0),
            'g' => Self::new(0.0, 0.5, 0.0),
            'b' => Self::new(0.0, 0.0, 1.0),
            'c' => Self::new(0.0, 0.75, 0.75),
            'm' => Self::new(0.75, 0.0, 0.75),
            'y' => Self::new(0.75, 0.75, 0.0),
            _ => return None,
        };
        Some(c)
    }

    /// 8-bit channels
    #[inline]
    #[must_use]
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_u8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Sample the rainbow ramp at `x`, clamped to `[0, 1]`
#[must_use]
pub fn rainbow(x: f64) -> Rgb {
    let x = x.clamp(0.0, 1.0);
    Rgb::new(
        (2.0 * x - 0.5).abs().clamp(0.0, 1.0),
        (PI * x).sin().clamp(0.0, 1.0),
        (PI * x / 2.0).cos().clamp(0.0, 1.0),
    )
}

/// `n` colors at evenly spaced points `linspace(0, 1, n)`
#[must_use]
pub fn rainbow_ramp(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![rainbow(0.0)],
        _ => (0..n)
            .map(|i| rainbow(i as f64 / (n - 1) as f64))
            .collect(),
    }
}
