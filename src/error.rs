//! User-facing diagnostics.
//!
//! The library crates carry actionable error kinds; this module wraps them
//! into miette diagnostics so failures print with remediation steps — in
//! particular the install commands for the renderer binary and the Nanum
//! fonts, which cover the two environment problems users actually hit.

use derive_more::{Display, Error};
use miette::Diagnostic;

#[derive(Debug, Display, Error, Diagnostic)]
pub enum CliError {
    /// Aborted before reading any input: with no renderer there is nothing
    /// useful this tool can do.
    #[display("wkhtmltopdf was not found on this system")]
    #[diagnostic(
        code(hanji::renderer_not_found),
        help("install it with: sudo apt-get update && sudo apt-get install -y wkhtmltopdf")
    )]
    RendererNotFound,

    #[display("could not read {path}")]
    #[diagnostic(code(hanji::read_input))]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    #[display("{path} is not valid UTF-8 (first invalid byte at offset {offset})")]
    #[diagnostic(code(hanji::invalid_encoding), help("re-save the document as UTF-8 and try again"))]
    InvalidEncoding {
        path: String,
        offset: usize,
    },

    #[display("PDF conversion failed (wkhtmltopdf exited with code {code})\n{stderr}")]
    #[diagnostic(
        code(hanji::render_failed),
        help(
            "if the output mentions missing fonts: sudo apt-get install -y fonts-nanum; \
             reinstalling wkhtmltopdf can help if the problem persists"
        )
    )]
    RenderFailed {
        code: i32,
        stderr: String,
    },

    #[display("PDF conversion did not finish within {secs}s")]
    #[diagnostic(
        code(hanji::render_timeout),
        help("raise --timeout, or lower the configured javascript_delay_ms for static documents")
    )]
    RenderTimeout {
        secs: u64,
    },

    #[display("PDF conversion was killed before producing output")]
    #[diagnostic(code(hanji::render_killed))]
    RenderKilled,

    #[display("PDF conversion failed: {message}")]
    #[diagnostic(code(hanji::render))]
    Render {
        message: String,
    },

    #[display("unknown builtin stylesheet: {name}")]
    #[diagnostic(code(hanji::unknown_style), help("run `hanji --list-styles` to see the available names"))]
    UnknownStyle {
        name: String,
    },

    #[display("could not load stylesheet {path}: {message}")]
    #[diagnostic(code(hanji::stylesheet))]
    Stylesheet {
        path: String,
        message: String,
    },

    #[display("{message}")]
    #[diagnostic(code(hanji::config), help("check the config file against the keys in `hanji --help`"))]
    Config {
        message: String,
    },
}
