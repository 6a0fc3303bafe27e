//! PDF rendering by way of an external wkhtmltopdf binary.
//!
//! [`Renderer`] discovers (or is pointed at) a wkhtmltopdf executable,
//! stages the HTML and the combined user stylesheet as temporary files,
//! and runs one synchronous conversion per call. Option assembly is
//! deterministic: a given [`RenderOptions`] always produces the same
//! argument vector. [`FontProbe`] is the advisory half — it checks whether
//! the family the enricher forces actually exists on disk.

pub mod error;
mod fonts;
mod options;
mod render;
mod style;
mod wkhtmltopdf;

use crate::error::{Error, Result};
use crate::wkhtmltopdf::Wkhtmltopdf;
pub use crate::fonts::{FontProbe, FontStatus, NANUM_FONT_DIR};
pub use crate::options::{Orientation, PageSize, RenderOptions};
pub use crate::render::Output;
pub use crate::style::StyleConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type TempFile = tempfile::NamedTempFile;

/// Wall-clock budget for a single conversion unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Renderer {
    wkhtmltopdf: Wkhtmltopdf,
    options: RenderOptions,
    styles: StyleConfig,
    timeout: Duration,
}
impl Renderer {
    /// Discovers a wkhtmltopdf binary on the system.
    pub fn new(options: RenderOptions, styles: StyleConfig) -> Result<Self> {
        Ok(Self { wkhtmltopdf: Wkhtmltopdf::discover()?, options, styles, timeout: DEFAULT_TIMEOUT })
    }

    /// Uses an explicit binary (e.g. from configuration) instead of
    /// discovery. The path is validated.
    pub fn with_binary(binary: impl Into<PathBuf>, options: RenderOptions, styles: StyleConfig) -> Result<Self> {
        Ok(Self { wkhtmltopdf: Wkhtmltopdf::at(binary)?, options, styles, timeout: DEFAULT_TIMEOUT })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolved path of the underlying binary.
    pub fn binary_path(&self) -> &Path {
        self.wkhtmltopdf.path()
    }

    /// Human-readable version string of the underlying binary.
    pub fn version(&self) -> Result<String> {
        self.wkhtmltopdf.version()
    }
}
impl TryFrom<RenderOptions> for Renderer {
    type Error = Error;
    fn try_from(options: RenderOptions) -> std::result::Result<Self, Self::Error> {
        Renderer::new(options, StyleConfig::default())
    }
}
