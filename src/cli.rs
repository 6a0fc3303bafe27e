use hanji_render::{Orientation, PageSize};
use std::path::PathBuf;

/// Convert an HTML document to PDF with wkhtmltopdf, optionally forcing a
/// Korean font onto the document first.
#[derive(clap::Parser, Debug)]
#[clap(name = "hanji", version, about)]
pub struct Cli {
    /// HTML document to convert
    #[clap(required_unless_present = "list_styles")]
    pub input: Option<PathBuf>,

    /// Where to write the PDF (defaults to the input name with `.pdf`)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Additional CSS applied as the user stylesheet (repeatable)
    #[clap(long = "css")]
    pub css: Vec<PathBuf>,

    /// Builtin stylesheet to apply by name (repeatable)
    #[clap(long = "style")]
    pub styles: Vec<String>,

    /// List embedded builtin stylesheets and exit
    #[clap(long)]
    pub list_styles: bool,

    /// Page size: a4, letter or legal
    #[clap(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,

    /// Page orientation: portrait or landscape
    #[clap(long, value_parser = parse_orientation)]
    pub orientation: Option<Orientation>,

    /// Font family forced onto the document (defaults to the configured one)
    #[clap(long, conflicts_with = "no_korean_font")]
    pub font: Option<String>,

    /// Disable Korean font enrichment; the document is rendered as-is
    #[clap(long)]
    pub no_korean_font: bool,

    /// Explicit wkhtmltopdf binary instead of discovery
    #[clap(long)]
    pub binary: Option<PathBuf>,

    /// Wall-clock budget for the renderer, in seconds
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Explicit config file (TOML, YAML or JSON)
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn parse_page_size(value: &str) -> Result<PageSize, String> {
    value.parse().map_err(|err: hanji_render::error::Error| err.to_string())
}

fn parse_orientation(value: &str) -> Result<Orientation, String> {
    value.parse().map_err(|err: hanji_render::error::Error| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_a_full_invocation() {
        let cli = Cli::parse_from([
            "hanji",
            "report.html",
            "--page-size",
            "letter",
            "--orientation",
            "landscape",
            "--css",
            "extra.css",
            "--font",
            "NanumMyeongjo",
            "-o",
            "out.pdf",
        ]);
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("report.html")));
        assert_eq!(cli.page_size, Some(PageSize::Letter));
        assert_eq!(cli.orientation, Some(Orientation::Landscape));
        assert_eq!(cli.css, vec![PathBuf::from("extra.css")]);
        assert_eq!(cli.font.as_deref(), Some("NanumMyeongjo"));
        assert_eq!(cli.output, Some(PathBuf::from("out.pdf")));
    }

    #[test]
    fn rejects_bad_page_size() {
        let result = Cli::try_parse_from(["hanji", "report.html", "--page-size", "tabloid"]);
        assert!(result.is_err());
    }

    #[test]
    fn font_flag_conflicts_with_disabling() {
        let result = Cli::try_parse_from(["hanji", "report.html", "--font", "X", "--no-korean-font"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_styles_needs_no_input() {
        let cli = Cli::parse_from(["hanji", "--list-styles"]);
        assert!(cli.list_styles);
        assert!(cli.input.is_none());
    }
}
