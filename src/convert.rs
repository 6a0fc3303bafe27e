//! The one-shot conversion pipeline.
//!
//! A [`Request`] is the fully-resolved picture of one conversion: CLI flags
//! merged over configuration, with defaults filled in. [`run`] then drives
//! it end to end — probe, read, enrich, render — synchronously; there is
//! nothing to coordinate beyond a single subprocess.

use crate::cli::Cli;
use crate::error::CliError;
use hanji_config::Config;
use hanji_enrich::enrich_bytes;
use hanji_render::{FontProbe, FontStatus, RenderOptions, Renderer, StyleConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

/// Everything a single conversion needs.
#[derive(Debug)]
pub struct Request {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: RenderOptions,
    pub styles: StyleConfig,
    /// `None` disables enrichment entirely.
    pub font: Option<String>,
    pub font_dir: PathBuf,
    pub binary: Option<PathBuf>,
    pub timeout: Duration,
}

impl Request {
    /// Merges CLI flags over file/env configuration. Flags always win.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self, CliError> {
        let input = cli.input.clone().expect("clap enforces an input outside --list-styles");
        let mut styles = StyleConfig::new();
        for name in &cli.styles {
            styles = styles
                .with_builtin(name)
                .map_err(|_| CliError::UnknownStyle { name: name.clone() })?;
        }
        for path in &cli.css {
            styles = styles.with_file(path).map_err(|err| CliError::Stylesheet {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        }
        // A --font flag re-enables enrichment even when the config has it
        // off; --no-korean-font beats everything.
        let enabled = !cli.no_korean_font && (cli.font.is_some() || config.font.enabled);
        let font = enabled.then(|| cli.font.clone().unwrap_or_else(|| config.font.family.clone()));
        Ok(Self {
            output: cli.output.clone().unwrap_or_else(|| output_path_for(&input)),
            input,
            options: RenderOptions {
                page_size: cli.page_size.unwrap_or(config.page.size),
                orientation: cli.orientation.unwrap_or(config.page.orientation),
                dpi: config.page.dpi,
                javascript_delay_ms: config.page.javascript_delay_ms,
            },
            styles,
            font,
            font_dir: config.font.dir.clone(),
            binary: cli.binary.clone().or_else(|| config.renderer.binary.clone()),
            timeout: Duration::from_secs(cli.timeout.unwrap_or(config.renderer.timeout_secs)),
        })
    }
}

/// Runs one conversion end to end and returns the PDF's path.
#[instrument(skip_all, fields(input = %request.input.display()))]
pub fn run(request: Request) -> Result<PathBuf, CliError> {
    // Renderer discovery comes first: with no binary there is no point
    // reading any input.
    let renderer = match &request.binary {
        Some(path) => Renderer::with_binary(path, request.options.clone(), request.styles),
        None => Renderer::new(request.options.clone(), request.styles),
    }
    .map_err(|err| map_render_error(err, request.timeout))?
    .with_timeout(request.timeout);
    if let Ok(version) = renderer.version() {
        tracing::debug!(version = %version, binary = %renderer.binary_path().display(), "renderer ready");
    }

    // The font probe is advisory: a miss warns and conversion continues,
    // leaving substitution to the renderer.
    if let Some(family) = &request.font
        && FontStatus::Missing == FontProbe::new(&request.font_dir).probe(family)
    {
        tracing::warn!(
            family = %family,
            dir = %request.font_dir.display(),
            "font not installed; text may render with a substitute (sudo apt-get install -y fonts-nanum)"
        );
    }

    let raw = std::fs::read(&request.input).map_err(|source| CliError::ReadInput {
        path: request.input.display().to_string(),
        source,
    })?;
    let enriched = enrich_bytes(&raw, request.font.as_deref()).map_err(|err| match &*err {
        hanji_enrich::error::ErrorKind::InvalidEncoding(offset) => CliError::InvalidEncoding {
            path: request.input.display().to_string(),
            offset: *offset,
        },
    })?;

    renderer
        .render_slice_to(enriched.as_bytes(), &request.output)
        .map_err(|err| map_render_error(err, request.timeout))?;
    tracing::info!(output = %request.output.display(), "conversion finished");
    Ok(request.output)
}

fn map_render_error(err: hanji_render::error::Error, timeout: Duration) -> CliError {
    use hanji_render::error::ErrorKind;
    match &*err {
        ErrorKind::RendererNotFound => CliError::RendererNotFound,
        ErrorKind::RenderFailed { code, stderr } => CliError::RenderFailed { code: *code, stderr: stderr.clone() },
        ErrorKind::RenderTimeout => CliError::RenderTimeout { secs: timeout.as_secs() },
        ErrorKind::RenderKilled => CliError::RenderKilled,
        other => CliError::Render { message: other.to_string() },
    }
}

/// `report.html` → `report.pdf`, next to the input.
fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use hanji_render::{Orientation, PageSize};
    use rstest::rstest;

    #[rstest]
    #[case("report.html", "report.pdf")]
    #[case("docs/보고서.html", "docs/보고서.pdf")]
    #[case("archive.tar", "archive.pdf")]
    #[case("notes", "notes.pdf")]
    fn output_lands_next_to_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(output_path_for(Path::new(input)), Path::new(expected));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["hanji", "in.html", "--page-size", "legal", "--timeout", "10"]);
        let request = Request::resolve(&cli, &Config::default()).unwrap();
        assert_eq!(request.options.page_size, PageSize::Legal);
        // Unset flags fall back to config defaults.
        assert_eq!(request.options.orientation, Orientation::Portrait);
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert_eq!(request.output, PathBuf::from("in.pdf"));
    }

    #[test]
    fn explicit_output_wins() {
        let cli = Cli::parse_from(["hanji", "in.html", "-o", "elsewhere/out.pdf"]);
        let request = Request::resolve(&cli, &Config::default()).unwrap();
        assert_eq!(request.output, PathBuf::from("elsewhere/out.pdf"));
    }

    #[test]
    fn font_defaults_to_configured_family() {
        let cli = Cli::parse_from(["hanji", "in.html"]);
        let request = Request::resolve(&cli, &Config::default()).unwrap();
        assert_eq!(request.font.as_deref(), Some("NanumGothic"));
    }

    #[test]
    fn no_korean_font_disables_enrichment() {
        let cli = Cli::parse_from(["hanji", "in.html", "--no-korean-font"]);
        let request = Request::resolve(&cli, &Config::default()).unwrap();
        assert_eq!(request.font, None);
    }

    #[test]
    fn font_flag_overrides_disabled_config() {
        let mut config = Config::default();
        config.font.enabled = false;
        let cli = Cli::parse_from(["hanji", "in.html", "--font", "NanumMyeongjo"]);
        let request = Request::resolve(&cli, &config).unwrap();
        assert_eq!(request.font.as_deref(), Some("NanumMyeongjo"));

        let cli = Cli::parse_from(["hanji", "in.html"]);
        let request = Request::resolve(&cli, &config).unwrap();
        assert_eq!(request.font, None);
    }

    #[test]
    fn unknown_builtin_style_is_reported() {
        let cli = Cli::parse_from(["hanji", "in.html", "--style", "missing.css"]);
        let err = Request::resolve(&cli, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::UnknownStyle { name } if name == "missing.css"));
    }

    #[test]
    fn missing_css_file_is_reported() {
        let cli = Cli::parse_from(["hanji", "in.html", "--css", "/no/such/file.css"]);
        let err = Request::resolve(&cli, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Stylesheet { .. }));
    }

    fn request_with_binary(binary: Option<PathBuf>) -> Request {
        Request {
            input: PathBuf::from("/no/such/input.html"),
            output: PathBuf::from("/no/such/input.pdf"),
            options: RenderOptions::default(),
            styles: StyleConfig::new(),
            font: None,
            font_dir: PathBuf::from("/no/such/fonts"),
            binary,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn missing_renderer_binary_aborts_before_reading_input() {
        let err = run(request_with_binary(Some(PathBuf::from("/no/such/wkhtmltopdf")))).unwrap_err();
        assert!(matches!(err, CliError::RendererNotFound));
    }

    #[test]
    fn unreadable_input_is_reported_with_its_path() {
        // Any plain file passes binary validation; the input read fails first.
        let fake_binary = tempfile::NamedTempFile::new().unwrap();
        let err = run(request_with_binary(Some(fake_binary.path().to_path_buf()))).unwrap_err();
        assert!(matches!(err, CliError::ReadInput { path, .. } if path.contains("input.html")));
    }
}
