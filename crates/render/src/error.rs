//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. See `ERRORS.md` for design rationale.
//!
//! TODO: Definitely going to refactor this later once I've written a few
//!       more crates. Designing errors in Rust is **hard** and I don't want
//!       to resort to anyhow+thiserror just because I don't want to deal with it.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("wkhtmltopdf not detected on your system")]
    RendererNotFound,
    /// The renderer exceeded its wall-clock budget and was killed.
    RenderTimeout,
    /// wkhtmltopdf exited with a non-zero exit code. Its stderr is the only
    /// useful failure signal, so it travels with the error.
    #[display("wkhtmltopdf exited with code {code}: {stderr}")]
    RenderFailed {
        code: i32,
        stderr: String,
    },
    /// Killed by a signal or crashed; there is no exit code to report.
    #[display("wkhtmltopdf died before producing output")]
    RenderKilled,
    /// Stylesheet was not loadable (either file or builtin).
    AssetNotFound(#[error(not(source))] String),
    /// Unrecognized page size spelling.
    #[display("unknown page size: {_0}")]
    InvalidPageSize(#[error(not(source))] String),
    /// Unrecognized orientation spelling.
    #[display("unknown orientation: {_0}")]
    InvalidOrientation(#[error(not(source))] String),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A timed-out render may succeed on a quieter machine; everything
        // else is deterministic for a given document and host.
        matches!(self, Self::RenderTimeout)
    }
}
