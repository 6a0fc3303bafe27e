//! Layered configuration for hanji.
//!
//! Values resolve lowest-to-highest from compiled defaults, an optional
//! config file (TOML, YAML, or JSON — either discovered in the platform
//! config directory or given explicitly), and `HANJI_*` environment
//! variables. Command-line flags are merged on top by the binary, so a
//! flag always wins.
//!
//! ```toml
//! [renderer]
//! binary = "/opt/wkhtmltox/bin/wkhtmltopdf"
//! timeout_secs = 120
//!
//! [font]
//! enabled = true
//! family = "NanumGothic"
//! dir = "/usr/share/fonts/truetype/nanum"
//!
//! [page]
//! size = "A4"
//! orientation = "portrait"
//! dpi = 300
//! javascript_delay_ms = 1000
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use hanji_render::{Orientation, PageSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix; nested keys use `__`, e.g.
/// `HANJI_FONT__FAMILY=NanumMyeongjo`.
const ENV_PREFIX: &str = "HANJI_";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub renderer: RendererConfig,
    pub font: FontConfig,
    pub page: PageConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Explicit wkhtmltopdf binary; discovery is used when unset.
    pub binary: Option<PathBuf>,
    /// Wall-clock budget for a single conversion, in seconds.
    pub timeout_secs: u64,
}
impl Default for RendererConfig {
    fn default() -> Self {
        Self { binary: None, timeout_secs: hanji_render::DEFAULT_TIMEOUT.as_secs() }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Whether CJK font enrichment is applied at all.
    pub enabled: bool,
    /// Family forced onto the document's text-bearing tags.
    pub family: String,
    /// Directory scanned by the startup font probe.
    pub dir: PathBuf,
}
impl Default for FontConfig {
    fn default() -> Self {
        Self { enabled: true, family: "NanumGothic".to_string(), dir: hanji_render::NANUM_FONT_DIR.into() }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub size: PageSize,
    pub orientation: Orientation,
    pub dpi: u32,
    pub javascript_delay_ms: u32,
}
impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            orientation: Orientation::default(),
            dpi: 300,
            javascript_delay_ms: 1_000,
        }
    }
}

impl Config {
    /// Loads configuration from the platform config directory plus the
    /// environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_dir().as_deref())
    }

    /// Loads configuration, rooting file lookups at `dir` when given.
    ///
    /// All three formats are consulted; where the same key appears in
    /// several files, JSON overrides YAML overrides TOML (matching the
    /// merge order, not a preference — keep one file).
    pub fn load_from(dir: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = dir {
            tracing::debug!(dir = %dir.display(), "looking for config files");
            figment = figment
                .merge(Toml::file(dir.join("config.toml")))
                .merge(Yaml::file(dir.join("config.yaml")))
                .merge(Json::file(dir.join("config.json")));
        }
        extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Loads configuration from one explicit file (the extension decides
    /// the format), plus environment overrides.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let defaults = Figment::from(Serialized::defaults(Config::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => defaults.merge(Yaml::file(path)),
            Some("json") => defaults.merge(Json::file(path)),
            _ => defaults.merge(Toml::file(path)),
        };
        extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

fn extract(figment: Figment) -> Result<Config> {
    match figment.extract() {
        Ok(config) => Ok(config),
        Err(err) => exn::bail!(ErrorKind::InvalidConfig(err.to_string())),
    }
}

/// Platform config directory for hanji (e.g. `~/.config/hanji`).
pub fn default_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "hanji").map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_without_any_file() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(None).unwrap();
            assert_eq!(config.font.family, "NanumGothic");
            assert!(config.font.enabled);
            assert_eq!(config.page.size, PageSize::A4);
            assert_eq!(config.page.orientation, Orientation::Portrait);
            assert_eq!(config.page.dpi, 300);
            assert_eq!(config.renderer.binary, None);
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    [page]
                    size = "Letter"
                    orientation = "landscape"

                    [font]
                    family = "NanumMyeongjo"
                "#,
            )?;
            let config = Config::load_from(Some(Path::new("."))).unwrap();
            assert_eq!(config.page.size, PageSize::Letter);
            assert_eq!(config.page.orientation, Orientation::Landscape);
            assert_eq!(config.font.family, "NanumMyeongjo");
            // Untouched sections keep their defaults.
            assert_eq!(config.page.dpi, 300);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[font]\nfamily = \"NanumMyeongjo\"\n")?;
            jail.set_env("HANJI_FONT__FAMILY", "NanumBarunGothic");
            jail.set_env("HANJI_RENDERER__TIMEOUT_SECS", "30");
            let config = Config::load_from(Some(Path::new("."))).unwrap();
            assert_eq!(config.font.family, "NanumBarunGothic");
            assert_eq!(config.renderer.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        let err = Config::load_file("/no/such/config.toml").unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[page]\npaper = \"A4\"\n")?;
            let err = Config::load_from(Some(Path::new("."))).unwrap_err();
            assert!(matches!(&*err, ErrorKind::InvalidConfig(_)));
            Ok(())
        });
    }

    #[rstest]
    #[case("hanji.toml", "[page]\nsize = \"Legal\"\n")]
    #[case("hanji.yaml", "page:\n  size: Legal\n")]
    #[case("hanji.yml", "page:\n  size: Legal\n")]
    #[case("hanji.json", r#"{"page": {"size": "Legal"}}"#)]
    fn explicit_file_format_follows_extension(#[case] name: &str, #[case] content: &str) {
        figment::Jail::expect_with(|jail| {
            jail.create_file(name, content)?;
            let config = Config::load_file(name).unwrap();
            assert_eq!(config.page.size, PageSize::Legal);
            Ok(())
        });
    }
}
