use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::Coordinates;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub results: ResultSettings,
    #[serde(default)]
    pub images: ImageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String { "http://localhost:8000".to_string() }
// The backend runs an AI agent per search; responses are slow.
fn default_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_center")]
    pub default_center: Coordinates,
    #[serde(default = "default_fit_padding")]
    pub fit_padding: u32,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    pub provider_key: Option<String>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_center: default_center(),
            fit_padding: default_fit_padding(),
            zoom: default_zoom(),
            provider_key: None,
        }
    }
}

fn default_center() -> Coordinates { Coordinates::new(40.7128, -74.0060) }
fn default_fit_padding() -> u32 { 50 }
fn default_zoom() -> u8 { 13 }

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ResultSettings {
    fn default() -> Self {
        Self { page_size: default_page_size() }
    }
}

fn default_page_size() -> usize { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_deny_list")]
    pub deny_list: Vec<String>,
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            deny_list: default_deny_list(),
            placeholder_url: default_placeholder_url(),
        }
    }
}

fn default_deny_list() -> Vec<String> {
    [
        "picsum",
        "unsplash",
        "placeholder",
        "via.placeholder",
        "example.com",
        "example.org",
        "lorem",
        "dummy",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_placeholder_url() -> String { "https://via.placeholder.com/300x200".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FINDER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FINDER__API__BASE_URL -> api.base_url
            .add_source(finder_environment())
            .build()?;

        apply_legacy_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(finder_environment())
            .build()?;

        apply_legacy_env(settings)?.try_deserialize()
    }
}

fn finder_environment() -> Environment {
    Environment::with_prefix("FINDER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the variable names the web deployment already uses.
///
/// `BACKEND_URL` and `GOOGLE_MAPS_API_KEY` only apply when the prefixed
/// variables are absent.
fn apply_legacy_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if env::var("FINDER__API__BASE_URL").is_err() {
        if let Ok(url) = env::var("BACKEND_URL") {
            builder = builder.set_override("api.base_url", url)?;
        }
    }
    if env::var("FINDER__MAP__PROVIDER_KEY").is_err() {
        if let Ok(key) = env::var("GOOGLE_MAPS_API_KEY") {
            builder = builder.set_override("map.provider_key", key)?;
        }
    }

    builder.build()
}
