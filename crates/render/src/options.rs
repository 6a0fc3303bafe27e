//! Conversion options mapped onto wkhtmltopdf's command line.

use crate::error::{Error, ErrorKind};
use std::ffi::OsString;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

/// A paper size understood by wkhtmltopdf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
}
impl PageSize {
    /// The exact spelling wkhtmltopdf expects for `--page-size`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "Letter",
            Self::Legal => "Legal",
        }
    }
}
impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
impl FromStr for PageSize {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            _ => exn::bail!(ErrorKind::InvalidPageSize(s.to_string())),
        }
    }
}

/// Page orientation, passed lower-cased to `--orientation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}
impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}
impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
impl FromStr for Orientation {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => exn::bail!(ErrorKind::InvalidOrientation(s.to_string())),
        }
    }
}

/// Options for a single conversion.
///
/// Page size and orientation pass through from the caller; the remaining
/// knobs are quality defaults for faithful print output. Derivation into
/// the argument vector is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub dpi: u32,
    /// How long wkhtmltopdf waits for scripts to settle, in milliseconds.
    pub javascript_delay_ms: u32,
}
impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            dpi: 300,
            javascript_delay_ms: 1_000,
        }
    }
}
impl RenderOptions {
    /// Serializes the options into wkhtmltopdf arguments.
    ///
    /// Always emitted: local file access (the staged stylesheet is read
    /// from disk), UTF-8 encoding, no PDF outline, smart shrinking off,
    /// and print-media CSS emulation.
    pub(crate) fn to_args(&self, user_style_sheet: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--enable-local-file-access".into(),
            "--page-size".into(),
            self.page_size.as_str().into(),
            "--orientation".into(),
            self.orientation.as_str().into(),
            "--encoding".into(),
            "UTF-8".into(),
            "--no-outline".into(),
            "--disable-smart-shrinking".into(),
            "--dpi".into(),
            self.dpi.to_string().into(),
            "--print-media-type".into(),
            "--javascript-delay".into(),
            self.javascript_delay_ms.to_string().into(),
        ];
        if let Some(sheet) = user_style_sheet {
            args.push("--user-style-sheet".into());
            args.push(sheet.as_os_str().to_os_string());
        }
        args
    }
}
