//! HTML enrichment ahead of PDF rendering.
//!
//! This crate prepares an HTML document for an external HTML-to-PDF
//! renderer by injecting a `<meta charset="utf-8">` tag and a `<style>`
//! block that forces a named CJK font onto the document's text-bearing
//! tags. The transformation is a pure string operation:
//!
//! - Documents with a `<head>` opening tag get the block spliced in
//!   immediately after it.
//! - Headless fragments are wrapped in a minimal well-formed document
//!   skeleton with the original content placed verbatim inside `<body>`.
//! - With enrichment disabled the input passes through untouched.
//!
//! No I/O happens here; the renderer-facing plumbing lives in
//! `hanji-render`.

pub mod error;
mod inject;

use crate::error::{ErrorKind, Result};
pub use crate::inject::Injector;
use std::borrow::Cow;
use tracing::instrument;

/// Easy, top-level entrypoint for enriching raw HTML bytes.
///
/// Accepts raw bytes rather than requiring the HTML to already be decoded;
/// input that is not valid UTF-8 is the one failure mode. Passing
/// `family = None` disables enrichment entirely and returns the input
/// unchanged (and unallocated).
#[instrument(skip(html), fields(html_size = html.len()))]
pub fn enrich_bytes<'a>(html: &'a [u8], family: Option<&str>) -> Result<Cow<'a, str>> {
    let text = match std::str::from_utf8(html) {
        Ok(text) => text,
        Err(err) => exn::bail!(ErrorKind::InvalidEncoding(err.valid_up_to())),
    };
    Ok(match family {
        Some(family) => Injector::new(family).enrich(text),
        None => Cow::Borrowed(text),
    })
}
