use crate::error::{ErrorKind, Result};
use crate::{Renderer, TempFile};
use exn::ResultExt;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub enum Output {
    Persisted(PathBuf),
    Temporary(TempFile),
}
impl Output {
    /// Path of the rendered PDF, wherever it lives.
    pub fn path(&self) -> &Path {
        match self {
            Self::Persisted(path) => path,
            Self::Temporary(tmp) => tmp.path(),
        }
    }
}

impl Renderer {
    /// Renders enriched HTML to a temporary PDF.
    pub fn render<R: Read>(&self, html: R) -> Result<Output> {
        let output = TempFile::new().or_raise(|| ErrorKind::Io)?;
        self.render_to(html, output.path().to_path_buf())?;
        Ok(Output::Temporary(output))
    }

    /// Renders enriched HTML to `save_to`.
    ///
    /// The HTML and the combined user stylesheet are staged as named
    /// temporary files for the subprocess; both are removed when this
    /// returns, on success and on failure alike.
    #[instrument(skip_all)]
    pub fn render_to<R: Read>(&self, html: R, save_to: impl Into<PathBuf>) -> Result<Output> {
        let save_to = save_to.into();
        let input = persist_html(html)?;
        let sheet = self.styles.persist()?;
        self.wkhtmltopdf.execute(
            &self.options,
            sheet.as_ref().map(|tmp| tmp.path()),
            input.path(),
            &save_to,
            self.timeout,
        )?;
        Ok(Output::Persisted(save_to))
    }

    pub fn render_slice(&self, html: &[u8]) -> Result<Output> {
        self.render(Cursor::new(html))
    }

    pub fn render_slice_to(&self, html: &[u8], save_to: impl Into<PathBuf>) -> Result<Output> {
        self.render_to(Cursor::new(html), save_to)
    }
}

// Staged under a `.html` suffix; wkhtmltopdf sniffs the input kind from
// the file extension.
fn persist_html<R: Read>(mut html: R) -> Result<TempFile> {
    let mut tmp = tempfile::Builder::new().suffix(".html").tempfile().or_raise(|| ErrorKind::Io)?;
    std::io::copy(&mut html, &mut tmp).or_raise(|| ErrorKind::Io)?;
    tmp.flush().or_raise(|| ErrorKind::Io)?;
    Ok(tmp)
}
