//! Configuration loading and typed config structures for Quakemap.
//!
//! The optional configuration file is `quakemap.yaml`. Every field has a
//! default matching the stock map (USGS past-week feed, four basemaps,
//! legend bottom-right), so an empty or missing file is valid.
//! Environment variables override the deployment-specific values.

use std::path::Path;

use quakemap_types::{LegendPosition, MapView, RadiusPolicy, TileLayer};
use serde::Deserialize;

use crate::basemap::{DEFAULT_BASEMAP, EARTHQUAKE_OVERLAY, default_basemaps, default_view};

/// Default feed: every earthquake from the past week.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {message}")]
    Env {
        /// Name of the environment variable.
        name: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The configuration is internally inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration. Mirrors the structure of `quakemap.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapConfig {
    /// HTTP server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// Earthquake feed source and refresh.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Map view, basemaps and legend.
    #[serde(default)]
    pub map: MapSettings,

    /// Marker encoding options.
    #[serde(default)]
    pub encoding: EncodingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MapConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, and
    /// [`ConfigError::Env`] or [`ConfigError::Invalid`] if the result does
    /// not validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document means all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// - `QUAKEMAP_HOST` overrides `server.host`
    /// - `QUAKEMAP_PORT` overrides `server.port`
    /// - `QUAKEMAP_FEED_URL` overrides `feed.url` and clears `feed.summary`
    /// - `QUAKEMAP_REFRESH_SECS` overrides `feed.refresh_interval_secs`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a numeric override does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a numeric override does not parse.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("QUAKEMAP_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("QUAKEMAP_PORT") {
            self.server.port = parse_env("QUAKEMAP_PORT", &val)?;
        }
        if let Some(val) = lookup("QUAKEMAP_FEED_URL") {
            self.feed.url = val;
            self.feed.summary = None;
        }
        if let Some(val) = lookup("QUAKEMAP_REFRESH_SECS") {
            self.feed.refresh_interval_secs = parse_env("QUAKEMAP_REFRESH_SECS", &val)?;
        }
        Ok(())
    }

    /// Check cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if there are no basemaps, the
    /// default basemap is not in the catalog, or a zoom range is inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.basemaps.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "map.basemaps must list at least one tile layer",
            )));
        }
        if !self
            .map
            .basemaps
            .iter()
            .any(|layer| layer.name == self.map.default_basemap)
        {
            return Err(ConfigError::Invalid(format!(
                "map.default_basemap '{}' is not one of the configured basemaps",
                self.map.default_basemap
            )));
        }
        if let Some(layer) = self
            .map
            .basemaps
            .iter()
            .find(|layer| layer.min_zoom > layer.max_zoom)
        {
            return Err(ConfigError::Invalid(format!(
                "basemap '{}' has min_zoom {} above max_zoom {}",
                layer.name, layer.min_zoom, layer.max_zoom
            )));
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        name: name.to_owned(),
        message: format!("{value:?}: {e}"),
    })
}

/// HTTP server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Earthquake feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// GeoJSON feed URL.
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// USGS summary feed name such as `4.5_day`. Takes precedence over
    /// `url` when set.
    #[serde(default)]
    pub summary: Option<String>,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Seconds between refetches. `0` fetches once at startup.
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            summary: None,
            request_timeout_ms: default_request_timeout_ms(),
            refresh_interval_secs: 0,
        }
    }
}

/// Map view, basemaps, overlay and legend settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapSettings {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial viewport.
    #[serde(default = "default_view")]
    pub view: MapView,

    /// Basemap catalog in layer-control order.
    #[serde(default = "default_basemaps")]
    pub basemaps: Vec<TileLayer>,

    /// Basemap active when the page loads.
    #[serde(default = "default_basemap_name")]
    pub default_basemap: String,

    /// Display name of the earthquake overlay.
    #[serde(default = "default_overlay_name")]
    pub overlay_name: String,

    /// Legend corner.
    #[serde(default)]
    pub legend_position: LegendPosition,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            view: default_view(),
            basemaps: default_basemaps(),
            default_basemap: default_basemap_name(),
            overlay_name: default_overlay_name(),
            legend_position: LegendPosition::default(),
        }
    }
}

/// Marker encoding options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EncodingConfig {
    /// Treatment of radii below the minimum visible radius.
    #[serde(default)]
    pub radius_policy: RadiusPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_owned()
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_title() -> String {
    "Earthquake Map".to_owned()
}

fn default_basemap_name() -> String {
    DEFAULT_BASEMAP.to_owned()
}

fn default_overlay_name() -> String {
    EARTHQUAKE_OVERLAY.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.feed.url, DEFAULT_FEED_URL);
        assert_eq!(config.feed.refresh_interval_secs, 0);
        assert_eq!(config.map.basemaps.len(), 4);
        assert_eq!(config.map.default_basemap, "Default");
        assert_eq!(config.map.overlay_name, "Earthquake Data");
        assert_eq!(config.map.legend_position, LegendPosition::BottomRight);
        assert_eq!(config.encoding.radius_policy, RadiusPolicy::Clamp);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9090

feed:
  url: "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/4.5_day.geojson"
  summary: "significant_month"
  request_timeout_ms: 2500
  refresh_interval_secs: 300

map:
  title: "Significant quakes"
  view:
    latitude: 35.0
    longitude: 139.0
    zoom: 5
  default_basemap: "Plain"
  overlay_name: "Quakes"
  legend_position: "topleft"
  basemaps:
    - name: "Plain"
      url_template: "https://tile.example.org/{z}/{x}/{y}.png"
      max_zoom: 18

encoding:
  radius_policy: "preserve"

logging:
  level: "debug"
  json: true
"#;

        let config = MapConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.feed.summary.as_deref(), Some("significant_month"));
        assert_eq!(config.feed.request_timeout_ms, 2500);
        assert_eq!(config.feed.refresh_interval_secs, 300);
        assert_eq!(config.map.view.zoom, 5);
        assert_eq!(config.map.basemaps.len(), 1);
        assert_eq!(config.map.legend_position, LegendPosition::TopLeft);
        assert_eq!(config.encoding.radius_policy, RadiusPolicy::Preserve);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = MapConfig::parse("server:\n  port: 3000\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.map.basemaps.len(), 4);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = MapConfig::parse("");
        assert!(config.is_ok());
        assert_eq!(config.ok(), Some(MapConfig::default()));
    }

    #[test]
    fn parse_rejects_bad_yaml() {
        let config = MapConfig::parse("server: [unterminated");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_replace_values() {
        let mut config = MapConfig::default();
        let result = config.apply_overrides_from(|name| match name {
            "QUAKEMAP_PORT" => Some(String::from("9999")),
            "QUAKEMAP_FEED_URL" => Some(String::from("http://localhost/feed.geojson")),
            "QUAKEMAP_REFRESH_SECS" => Some(String::from(" 60 ")),
            _ => None,
        });
        assert!(result.is_ok());
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.feed.url, "http://localhost/feed.geojson");
        assert_eq!(config.feed.refresh_interval_secs, 60);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn bad_numeric_override_is_rejected() {
        let mut config = MapConfig::default();
        let result = config.apply_overrides_from(|name| {
            (name == "QUAKEMAP_PORT").then(|| String::from("eighty"))
        });
        assert!(matches!(result, Err(ConfigError::Env { ref name, .. }) if name == "QUAKEMAP_PORT"));
    }

    #[test]
    fn unknown_default_basemap_is_invalid() {
        let mut config = MapConfig::default();
        config.map.default_basemap = String::from("Satellite");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_zoom_range_is_invalid() {
        let mut config = MapConfig::default();
        if let Some(layer) = config.map.basemaps.first_mut() {
            layer.min_zoom = 21;
        }
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("quakemap.yaml");
        if path.exists() {
            let config = MapConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
