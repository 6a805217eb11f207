//! Configuration for the map session
//!
//! Every field has a default matching the classic demo setup (California
//! earthquakes over the Voyager basemap), so an empty JSON object is a valid
//! configuration. Individual sections can be overridden from a JSON file.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_DATA_LOCATION, DEFAULT_SCALE, DEFAULT_SUBDOMAINS, DEFAULT_TILE_URL,
    MAX_POINT_RADIUS, MAX_SCALE, MIN_SCALE, MIN_SURFACE_HEIGHT, MIN_SURFACE_WIDTH,
};
use crate::core::geo::LatLng;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub view: ViewConfig,
    pub tiles: TileConfig,
    pub overlay: OverlayConfig,
    pub data: DataConfig,
}

impl MapConfig {
    /// Parses a configuration from JSON and validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects configurations the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let view = &self.view;
        if !(view.min_scale > 0.0) || !view.max_scale.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "scale extent must be positive and finite, got [{}, {}]",
                view.min_scale, view.max_scale
            )));
        }
        if view.min_scale > view.max_scale {
            return Err(Error::InvalidConfig(format!(
                "min_scale {} exceeds max_scale {}",
                view.min_scale, view.max_scale
            )));
        }
        if view.default_scale < view.min_scale || view.default_scale > view.max_scale {
            return Err(Error::InvalidConfig(format!(
                "default_scale {} outside [{}, {}]",
                view.default_scale, view.min_scale, view.max_scale
            )));
        }
        if view.min_width <= 0.0 || view.min_height <= 0.0 {
            return Err(Error::InvalidConfig("surface size must be positive".into()));
        }
        if self.tiles.subdomains.is_empty() {
            return Err(Error::InvalidConfig("at least one tile subdomain is required".into()));
        }
        if !(self.overlay.max_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_radius must be positive, got {}",
                self.overlay.max_radius
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_width: f64,
    pub min_height: f64,
    /// `[longitude, latitude]` placed at the viewport center on startup
    pub default_center: [f64; 2],
    pub default_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl ViewConfig {
    pub fn center(&self) -> LatLng {
        LatLng::from_lng_lat(self.default_center[0], self.default_center[1])
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_SURFACE_WIDTH,
            min_height: MIN_SURFACE_HEIGHT,
            default_center: [DEFAULT_CENTER.0, DEFAULT_CENTER.1],
            default_scale: DEFAULT_SCALE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub subdomains: Vec<String>,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Radius in pixels of the strongest feature
    pub max_radius: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_radius: MAX_POINT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File path or `http(s)://` URL of the feature collection
    pub location: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_DATA_LOCATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = MapConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.view.min_scale, 2048.0);
        assert_eq!(config.view.max_scale, 16_777_216.0);
        assert_eq!(config.view.default_scale, 16384.0);
        assert_eq!(config.tiles.subdomains, vec!["a", "b", "c"]);
        assert_eq!(config.overlay.max_radius, 10.0);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "view": { "default_center": [0.0, 51.5] },
            "data": { "location": "quakes.json" }
        }"#;
        let config = MapConfig::from_json_str(json).unwrap();
        assert_eq!(config.view.center(), LatLng::new(51.5, 0.0));
        assert_eq!(config.view.default_scale, 16384.0);
        assert_eq!(config.data.location, "quakes.json");
    }

    #[test]
    fn test_validation_rejects_bad_extent() {
        let inverted =
            r#"{ "view": { "min_scale": 4096.0, "max_scale": 2048.0, "default_scale": 3000.0 } }"#;
        assert!(matches!(
            MapConfig::from_json_str(inverted),
            Err(Error::InvalidConfig(_))
        ));

        let outside = r#"{ "view": { "default_scale": 1.0 } }"#;
        assert!(matches!(
            MapConfig::from_json_str(outside),
            Err(Error::InvalidConfig(_))
        ));

        let no_hosts = r#"{ "tiles": { "subdomains": [] } }"#;
        assert!(matches!(
            MapConfig::from_json_str(no_hosts),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            MapConfig::from_json_str("{ not json"),
            Err(Error::Serialization(_))
        ));
    }
}
