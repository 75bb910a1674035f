//! flopplot Data
//!
//! Pre-parsed benchmark result tables, one set per tested library version.
//!
//! # Core Concepts
//!
//! - [`ResultTable`]: rectangular `f64` table, one row per problem size
//! - [`columns`]: named column offsets for each routine's table layout
//! - [`Version`]: one tested release and its tables, keyed by routine name
//! - [`VersionSet`]: versions ordered oldest to newest, colored on a rainbow ramp
//! - [`loader`]: reads version files (JSON, YAML or TOML) from disk
//!
//! # Example
//!
//! ```rust,ignore
//! use flopplot_data::{loader, columns::getrf};
//!
//! let versions = loader::load_dir("data".as_ref(), &[])?;
//! for v in versions.iter() {
//!     if let Some(t) = v.table("dgetrf") {
//!         println!("{}: {:?}", v.name(), t.column(getrf::GPU_FLOPS)?);
//!     }
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod color;
pub mod columns;
pub mod error;
pub mod loader;
mod table;
mod version;

pub use color::Rgb;
pub use error::{DataError, TableError};
pub use loader::DataFormat;
pub use table::ResultTable;
pub use version::{Precision, Version, VersionSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
