//! Charset and font injection.
//!
//! wkhtmltopdf resolves CSS font families against the fonts installed on
//! the rendering host. Documents authored without an explicit font stack
//! fall back to the Qt WebKit default, which for Korean text usually means
//! tofu. [`Injector`] declares the configured family as a local font and
//! forces it onto every text-bearing tag so the renderer picks up the
//! installed files instead.

use memchr::memchr;
use std::borrow::Cow;

/// Tags that receive the forced `font-family` rule.
const TEXT_TAGS: &str = "body, p, h1, h2, h3, h4, h5, h6, div, span, li, a, table, th, td";

/// Splices a charset meta tag and a font-forcing style block into HTML.
///
/// The transformation is pure: outside the spliced block, the input passes
/// through byte-for-byte. Documents with a `<head>` opening tag get the
/// block immediately after it; headless fragments are wrapped in a minimal
/// document skeleton instead.
pub struct Injector {
    family: String,
}
impl Injector {
    pub fn new(family: impl Into<String>) -> Self {
        Self { family: family.into() }
    }

    /// Returns the enriched document.
    pub fn enrich<'a>(&self, html: &'a str) -> Cow<'a, str> {
        let block = self.style_block();
        match head_open_end(html.as_bytes()) {
            Some(end) => {
                let mut out = String::with_capacity(html.len() + block.len() + 1);
                out.push_str(&html[..end]);
                out.push('\n');
                out.push_str(&block);
                out.push_str(&html[end..]);
                Cow::Owned(out)
            }
            None => {
                tracing::debug!("no <head> opening tag found; wrapping content in a document skeleton");
                Cow::Owned(format!(
                    "<!DOCTYPE html>\n<html>\n<head>\n{block}</head>\n<body>\n{html}\n</body>\n</html>\n"
                ))
            }
        }
    }

    /// The `<meta charset>` and `<style>` block forcing the configured family.
    fn style_block(&self) -> String {
        let family = css_escape_string(&self.family);
        format!(
            r#"<meta charset="utf-8">
<style>
@font-face {{
    font-family: '{family}';
    src: local('{family}');
}}
{TEXT_TAGS} {{
    font-family: '{family}', sans-serif !important;
}}
</style>
"#
        )
    }
}

/// Byte offset just past the `>` of the first `<head>` opening tag, if any.
///
/// Matching is ASCII-case-insensitive and attribute-tolerant: `<head>`,
/// `<HEAD>` and `<head lang="ko">` all match, while `<header>` does not.
fn head_open_end(html: &[u8]) -> Option<usize> {
    const NEEDLE: &[u8] = b"<head";
    let mut at = 0;
    while at + NEEDLE.len() <= html.len() {
        let rel = html[at..].windows(NEEDLE.len()).position(|w| w.eq_ignore_ascii_case(NEEDLE))?;
        let after = at + rel + NEEDLE.len();
        match html.get(after) {
            // `<head>`: the tag closes immediately.
            Some(b'>') => return Some(after + 1),
            // `<head ...>` or `<head/>`: skip to the closing bracket.
            Some(c) if c.is_ascii_whitespace() || *c == b'/' => {
                return memchr(b'>', &html[after..]).map(|gt| after + gt + 1);
            }
            // `<header>` or similar; keep scanning.
            _ => at = after,
        }
    }
    None
}

/// https://www.w3.org/TR/css-syntax-3/#consume-string-token
///
/// Escapes a value for interpolation into a single-quoted CSS string.
fn css_escape_string(value: impl AsRef<str>) -> String {
    value
        .as_ref()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\a ")
        .replace('\r', "\\d ")
        .replace('\x0C', "\\c ")
        .replace('\0', "\\fffd ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"<head>", Some(6))]
    #[case(b"<HEAD>", Some(6))]
    #[case(b"<html><head></head>", Some(12))]
    #[case(b"<head lang=\"ko\">body", Some(16))]
    #[case(b"<head\n  class=\"x\">", Some(18))]
    #[case(b"<header>content</header>", None)]
    #[case(b"<p>no head here</p>", None)]
    #[case(b"<header><head>", Some(14))]
    #[case(b"<head", None)]
    #[case(b"", None)]
    fn finds_head_opening_tag(#[case] html: &[u8], #[case] expected: Option<usize>) {
        assert_eq!(head_open_end(html), expected);
    }

    #[test]
    fn injects_immediately_after_head() {
        let injector = Injector::new("NanumGothic");
        let enriched = injector.enrich("<html><head></head><body>Hi</body></html>");
        assert!(enriched.starts_with("<html><head>\n<meta charset=\"utf-8\">"));
        assert!(enriched.contains("font-family: 'NanumGothic'"));
        assert!(enriched.contains("Hi"));
        // The original head is the only one.
        assert_eq!(enriched.matches("<head>").count(), 1);
    }

    #[test]
    fn body_content_passes_through_verbatim() {
        let body = "<body class=\"doc\"><p>안녕하세요 &amp; welcome</p></body>";
        let html = format!("<html><head><title>t</title></head>{body}</html>");
        let enriched = Injector::new("NanumGothic").enrich(&html);
        assert!(enriched.contains(body));
        assert!(enriched.ends_with("</html>"));
    }

    #[test]
    fn wraps_headless_content_in_skeleton() {
        let content = "<p>Hello</p>";
        let enriched = Injector::new("NanumGothic").enrich(content);
        assert!(enriched.starts_with("<!DOCTYPE html>"));
        assert!(enriched.contains("<head>"));
        assert!(enriched.contains("</head>"));
        let body_start = enriched.find("<body>").unwrap();
        let body_end = enriched.find("</body>").unwrap();
        assert!(enriched[body_start..body_end].contains(content));
    }

    #[test]
    fn header_tag_is_not_a_head() {
        let enriched = Injector::new("NanumGothic").enrich("<header>nav</header>");
        // No head to splice into, so the content gets a fresh skeleton.
        assert!(enriched.starts_with("<!DOCTYPE html>"));
        assert!(enriched.contains("<header>nav</header>"));
    }

    #[rstest]
    #[case("NanumGothic", "font-family: 'NanumGothic';")]
    #[case("맑은 고딕", "font-family: '맑은 고딕';")]
    #[case("Bad'Font", "font-family: 'Bad\\'Font';")]
    fn escapes_family_names(#[case] family: &str, #[case] expected: &str) {
        let enriched = Injector::new(family).enrich("<head></head>");
        assert!(enriched.contains(expected), "missing {expected:?} in {enriched}");
    }

    #[test]
    fn declares_local_font_face() {
        let enriched = Injector::new("NanumMyeongjo").enrich("<head></head>");
        assert!(enriched.contains("src: local('NanumMyeongjo');"));
        assert!(enriched.contains("sans-serif !important"));
    }
}
