//! Stylesheets embedded into the binary at compile time using
//! [`rust-embed`](rust_embed), so the default print styling works without
//! any files installed alongside the executable.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::Embed;
use std::borrow::Cow;

#[derive(Embed)]
#[folder = "../../assets/styles/"]
#[include = "*.css"]
pub struct Builtins;
impl Builtins {
    /// CSS content of a builtin stylesheet by name.
    pub fn load(name: impl AsRef<str>) -> Result<Cow<'static, [u8]>> {
        Self::get(name.as_ref()).map(|f| f.data).ok_or_raise(|| ErrorKind::AssetNotFound(Self::identifier(name)))
    }

    /// Names of every embedded stylesheet.
    pub fn list() -> Vec<Cow<'static, str>> {
        Self::iter().collect()
    }

    pub fn exists(name: impl AsRef<str>) -> bool {
        Self::get(name.as_ref()).is_some()
    }

    pub(crate) fn identifier(name: impl AsRef<str>) -> String {
        format!("builtin:{}", name.as_ref().trim().trim_start_matches("builtin:"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_load_print_style() {
        let css = Builtins::load("print.css");
        assert!(css.is_ok());
        assert!(!css.unwrap().is_empty());
    }

    #[test]
    fn list_includes_print() {
        assert!(Builtins::exists("print.css"));
        let styles = Builtins::list();
        assert!(styles.iter().any(|s| s == "print.css"));
    }
}
