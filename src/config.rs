//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults point
//! at the production API, CDN, and website; a user `config.toml` overrides just
//! the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "https://www.shaynalarsen.art/api"
//!
//! [cdn]
//! base_url = "https://smilingbear.nyc3.cdn.digitaloceanspaces.com"
//! feathers_path = "/public/images/feathers/paintings"
//! arrangements_path = "/public/images/arrangements/paintings"
//! image_extension = "jpeg"   # Format the CDN actually serves
//!
//! [website]
//! base_url = "https://www.shaynalarsen.art"
//!
//! [sharing]
//! artist = "Shayna Larsen"
//!
//! [pricing]
//! feather = "$225"
//! arrangement = "$125"
//! on_request = "Price on request"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Content API location.
    pub api: ApiConfig,
    /// Image CDN layout.
    pub cdn: CdnConfig,
    /// Public website used for detail pages and sharing.
    pub website: WebsiteConfig,
    /// Share caption settings.
    pub sharing: SharingConfig,
    /// Fixed price strings for collections without per-record prices.
    pub pricing: PricingConfig,
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("api.base_url", &self.api.base_url),
            ("cdn.base_url", &self.cdn.base_url),
            ("website.base_url", &self.website.base_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an absolute URL, got `{value}`"
                )));
            }
        }
        let ext = &self.cdn.image_extension;
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(ConfigError::Validation(
                "cdn.image_extension must be a bare extension like \"jpeg\"".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Endpoints are appended verbatim, e.g. `{base_url}/feathers`.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.shaynalarsen.art/api".to_string(),
        }
    }
}

/// CDN roots. Collection paths are joined onto `base_url`; spirit records
/// carry their own path fragments relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CdnConfig {
    pub base_url: String,
    pub feathers_path: String,
    pub arrangements_path: String,
    /// Image format the CDN serves. Feather filenames with any other suffix
    /// are rewritten to it.
    pub image_extension: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: "https://smilingbear.nyc3.cdn.digitaloceanspaces.com".to_string(),
            feathers_path: "/public/images/feathers/paintings".to_string(),
            arrangements_path: "/public/images/arrangements/paintings".to_string(),
            image_extension: "jpeg".to_string(),
        }
    }
}

impl CdnConfig {
    pub fn feathers_root(&self) -> String {
        join_base(&self.base_url, &self.feathers_path)
    }

    pub fn arrangements_root(&self) -> String {
        join_base(&self.base_url, &self.arrangements_path)
    }
}

fn join_base(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebsiteConfig {
    pub base_url: String,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.shaynalarsen.art".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharingConfig {
    /// Credited in every share caption.
    pub artist: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            artist: "Shayna Larsen".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Used when a feather record carries no price of its own.
    pub feather: String,
    pub arrangement: String,
    /// Shown for spirits without a listed price.
    pub on_request: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            feather: "$225".to_string(),
            arrangement: "$125".to_string(),
            on_request: "Price on request".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Painting Gallery Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Content API
# ---------------------------------------------------------------------------
[api]
# Collections are fetched from {base_url}/feathers, /arrangements, /spirits.
base_url = "https://www.shaynalarsen.art/api"

# ---------------------------------------------------------------------------
# Image CDN
# ---------------------------------------------------------------------------
[cdn]
base_url = "https://smilingbear.nyc3.cdn.digitaloceanspaces.com"
feathers_path = "/public/images/feathers/paintings"
arrangements_path = "/public/images/arrangements/paintings"

# Extension of the images the CDN serves. Feather records that still name
# files with another extension (e.g. "webp") are rewritten to this one.
image_extension = "jpeg"

# ---------------------------------------------------------------------------
# Public website (detail pages and share links)
# ---------------------------------------------------------------------------
[website]
base_url = "https://www.shaynalarsen.art"

# ---------------------------------------------------------------------------
# Sharing
# ---------------------------------------------------------------------------
[sharing]
artist = "Shayna Larsen"

# ---------------------------------------------------------------------------
# Pricing
# ---------------------------------------------------------------------------
[pricing]
# Shown for feathers without their own price.
feather = "$225"
arrangement = "$125"
# Shown for spirits without a listed price.
on_request = "Price on request"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_points_at_production() {
        let config = GalleryConfig::default();
        assert_eq!(config.api.base_url, "https://www.shaynalarsen.art/api");
        assert_eq!(config.website.base_url, "https://www.shaynalarsen.art");
        assert_eq!(config.cdn.image_extension, "jpeg");
    }

    #[test]
    fn cdn_roots_join_paths() {
        let cdn = CdnConfig::default();
        assert_eq!(
            cdn.feathers_root(),
            "https://smilingbear.nyc3.cdn.digitaloceanspaces.com/public/images/feathers/paintings"
        );
    }

    #[test]
    fn cdn_roots_tolerate_trailing_slash() {
        let cdn = CdnConfig {
            base_url: "https://cdn.example.com/".to_string(),
            ..CdnConfig::default()
        };
        assert_eq!(
            cdn.arrangements_root(),
            "https://cdn.example.com/public/images/arrangements/paintings"
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[api]
base_url = "http://localhost:3000/api"
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.sharing.artist, "Shayna Larsen");
        assert_eq!(config.pricing.feather, "$225");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[cdn]
image_extension = "avif"

[pricing]
arrangement = "$150"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.cdn.image_extension, "avif");
        assert_eq!(config.pricing.arrangement, "$150");
        assert_eq!(config.cdn.feathers_path, "/public/images/feathers/paintings");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[cdn]
image_extention = "jpeg"
"#;
        let result: Result<GalleryConfig, _> = toml::from_str(toml_str);
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<GalleryConfig, _> = toml::from_str("[auth]\ntoken = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let mut config = GalleryConfig::default();
        config.api.base_url = "shaynalarsen.art/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn validate_rejects_dotted_extension() {
        let mut config = GalleryConfig::default();
        config.cdn.image_extension = ".jpeg".to_string();
        assert!(config.validate().is_err());
        config.cdn.image_extension = String::new();
        assert!(config.validate().is_err());
        config.cdn.image_extension = "img/jpeg".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[website]
base_url = "not a url"
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[cdn]
base_url = "https://a"
image_extension = "jpeg"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[cdn]
base_url = "https://b"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let cdn = merged.get("cdn").unwrap();
        assert_eq!(cdn.get("base_url").unwrap().as_str(), Some("https://b"));
        assert_eq!(cdn.get("image_extension").unwrap().as_str(), Some("jpeg"));
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[sharing]
artist = "A. Painter"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.sharing.artist, "A. Painter");
        assert_eq!(config.pricing.on_request, "Price on request");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: GalleryConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in ["api", "cdn", "website", "sharing", "pricing"] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }
}
