//! Probing for installed font files.
//!
//! wkhtmltopdf resolves `src: local(..)` declarations against the fonts
//! installed on the host; when the named family is absent it silently
//! substitutes another one. The probe makes that visible *before*
//! rendering so callers can warn the user instead of shipping a PDF full
//! of wrong glyphs. A miss never fails the conversion.

use std::path::{Path, PathBuf};

/// Install directory of the Debian/Ubuntu `fonts-nanum` package.
pub const NANUM_FONT_DIR: &str = "/usr/share/fonts/truetype/nanum";

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Outcome of probing for a font family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontStatus {
    /// A font file matching the family was found.
    Found(PathBuf),
    /// No matching file; rendering falls back to a substitute family.
    Missing,
}
impl FontStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Scans a font directory for a file named after a family.
pub struct FontProbe {
    dir: PathBuf,
}
impl Default for FontProbe {
    fn default() -> Self {
        Self::new(NANUM_FONT_DIR)
    }
}
impl FontProbe {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Probes for `family`, matching file stems case-insensitively with
    /// whitespace ignored (`NanumGothic.ttf` matches `"Nanum Gothic"`).
    ///
    /// An unreadable or missing directory reports [`FontStatus::Missing`].
    pub fn probe(&self, family: &str) -> FontStatus {
        let wanted = normalize(family);
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            tracing::debug!(dir = %self.dir.display(), "font directory not readable");
            return FontStatus::Missing;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let known_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)));
            if !known_extension {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
                && normalize(stem) == wanted
            {
                return FontStatus::Found(path);
            }
        }
        FontStatus::Missing
    }
}

fn normalize(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase()
}
