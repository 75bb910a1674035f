//! Render configuration
//!
//! Loaded from TOML, YAML or JSON; every field has a default so an empty
//! file is valid.
//!
//! ```toml
//! figsize = [9.0, 7.0]
//! dpi = 100
//! legend_font_size = 10
//! subplots = true
//! format = "svg"
//! output_dir = "plots"
//! data_dir = "data"
//! order = ["1.5.0", "1.6.0", "1.6.1", "trunk"]
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::DEFAULT_FIGSIZE;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    #[inline]
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(ConfigError::Invalid(format!("unknown output format {other:?}"))),
        }
    }
}

/// Plotting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Width, height in inches of a full 2x2 plot
    pub figsize: (f64, f64),
    /// Pixels per inch
    pub dpi: u32,
    pub legend_font_size: u32,
    /// All panels of a plot in one figure, or one figure per panel
    pub subplots: bool,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Version names oldest to newest; empty means file-name order
    pub order: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figsize: DEFAULT_FIGSIZE,
            dpi: 100,
            legend_font_size: 10,
            subplots: true,
            format: OutputFormat::Svg,
            output_dir: PathBuf::from("plots"),
            data_dir: PathBuf::from("data"),
            order: Vec::new(),
        }
    }
}

impl PlotConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file, format chosen by extension
    ///
    /// # Errors
    /// Returns [`ConfigError`] for unreadable, malformed or out-of-range config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.into(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: Self = match ext.as_deref() {
            Some("toml") => toml::from_str(&text)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.into())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and resolutions that cannot produce an image
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = self.figsize;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::Invalid(format!("figsize must be positive, got {w}x{h}")));
        }
        if self.dpi == 0 {
            return Err(ConfigError::Invalid("dpi must be positive".into()));
        }
        if self.legend_font_size == 0 {
            return Err(ConfigError::Invalid("legend_font_size must be positive".into()));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn with_subplots(mut self, subplots: bool) -> Self {
        self.subplots = subplots;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: Vec<String>) -> Self {
        self.order = order;
        self
    }
}
