//! User stylesheet assembly.
//!
//! wkhtmltopdf accepts exactly one `--user-style-sheet` path, so every
//! stylesheet source — compile-time embedded builtins (see
//! [`StyleConfig::list_builtins`]), user-provided files, raw CSS content —
//! is concatenated into a single temporary sheet at render time. All
//! styles are read eagerly at construction time so that missing files fail
//! fast rather than mid-conversion.

mod assets;

use crate::TempFile;
use crate::error::{ErrorKind, Result};
use crate::style::assets::Builtins;
use exn::ResultExt;
use std::borrow::Cow;
use std::{fs::File, path::Path};
use std::{io::Read, io::Write};

#[derive(Debug)]
enum Style {
    Builtin(String),
    // Since styles are constructed once per invocation, file contents are
    // read during construction. They'd have to be loaded at render time
    // anyway, so do it here and fail fast.
    UserContent(String),
}
impl Style {
    fn write_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        let content = match self {
            // Infallible: business logic dictates that the builtin exists.
            Self::Builtin(name) => Builtins::load(name).expect("builtin validated at construction"),
            Self::UserContent(content) => Cow::Borrowed(content.as_bytes()),
        };
        w.write_all(&content)?;
        w.write_all(b"\n")
    }
}

/// An ordered collection of CSS stylesheets applied to rendered documents.
///
/// Styles are concatenated in insertion order, so later styles override
/// earlier ones under normal cascade rules. Use the builder methods to
/// compose builtins, files, and raw CSS content.
///
/// # Example
///
/// ```no_run
/// use hanji_render::StyleConfig;
/// # use hanji_render::error::Result;
///
/// # fn get_styles() -> Result<StyleConfig> {
/// let styles = StyleConfig::new()
///     .with_builtin("print.css")?
///     .with_file("/path/to/custom.css")?;
/// # Ok(styles)
/// # }
/// ```
#[derive(Default, Debug)]
pub struct StyleConfig {
    styles: Vec<Style>,
}
impl StyleConfig {
    /// Creates an empty style configuration with no stylesheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of all embedded builtin stylesheets (e.g. `"print.css"`).
    pub fn list_builtins() -> Vec<Cow<'static, str>> {
        assets::Builtins::list()
    }

    /// Appends a builtin stylesheet by name.
    ///
    /// Returns [`ErrorKind::AssetNotFound`](crate::error::ErrorKind::AssetNotFound)
    /// if `name` does not match any embedded asset. Use [`list_builtins()`](Self::list_builtins)
    /// to discover available names.
    pub fn with_builtin(mut self, name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if !Builtins::exists(name) {
            exn::bail!(ErrorKind::AssetNotFound(Builtins::identifier(name)));
        }
        self.styles.push(Style::Builtin(name.to_string()));
        Ok(self)
    }

    /// Appends a stylesheet read from a file on disk.
    ///
    /// The file is read immediately so that missing or unreadable files
    /// surface as errors during construction rather than at render time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            exn::bail!(ErrorKind::AssetNotFound(path.display().to_string()));
        }
        let mut file = File::open(path).or_raise(|| ErrorKind::Io)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf).or_raise(|| ErrorKind::Io)?;
        self.styles.push(Style::UserContent(buf));
        Ok(self)
    }

    /// Appends raw CSS content as a stylesheet. This is infallible since no
    /// I/O is involved.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.styles.push(Style::UserContent(content.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Writes every sheet into one temporary CSS file, in insertion order.
    ///
    /// Returns `None` when no styles are configured so callers can skip the
    /// `--user-style-sheet` argument entirely.
    pub(crate) fn persist(&self) -> Result<Option<TempFile>> {
        if self.styles.is_empty() {
            return Ok(None);
        }
        let mut tmp = tempfile::Builder::new().suffix(".css").tempfile().or_raise(|| ErrorKind::Io)?;
        for style in &self.styles {
            style.write_to(&mut tmp).or_raise(|| ErrorKind::Io)?;
        }
        tmp.flush().or_raise(|| ErrorKind::Io)?;
        tracing::debug!(sheets = self.styles.len(), path = %tmp.path().display(), "user stylesheet staged");
        Ok(Some(tmp))
    }
}
