//! Earthquake features extracted from a GeoJSON feature collection.

use crate::core::geo::LatLng;
use crate::data::geojson::{GeoJson, GeoJsonFeature};
use crate::Result;
use serde_json::{Map, Value};

/// Property holding the magnitude of a feature
pub const MAGNITUDE_PROPERTY: &str = "mag";

/// One earthquake: where it happened, how strong it was, and the full record.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub id: Option<Value>,
    pub location: LatLng,
    pub magnitude: f64,
    pub properties: Map<String, Value>,
}

impl GeoFeature {
    pub fn new(location: LatLng, magnitude: f64) -> Self {
        Self {
            id: None,
            location,
            magnitude,
            properties: Map::new(),
        }
    }

    /// Builds a feature from GeoJSON, or `None` when it has no point geometry
    /// or no numeric magnitude.
    pub fn from_geojson(feature: GeoJsonFeature) -> Option<Self> {
        let (lng, lat) = feature.geometry.as_ref()?.point_lng_lat()?;
        let properties = feature.properties.unwrap_or_default();
        let magnitude = properties.get(MAGNITUDE_PROPERTY)?.as_f64()?;

        Some(Self {
            id: feature.id,
            location: LatLng::from_lng_lat(lng, lat),
            magnitude,
            properties,
        })
    }
}

/// Immutable set of features loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<GeoFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    /// Parses a GeoJSON document, skipping unusable features
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        Ok(Self::from_geojson(GeoJson::parse(text)?))
    }

    pub fn from_geojson(geojson: GeoJson) -> Self {
        let mut features = Vec::new();
        for (index, raw) in geojson.into_features().into_iter().enumerate() {
            let kind = raw.geometry.as_ref().map(|g| g.kind()).unwrap_or("null");
            match GeoFeature::from_geojson(raw) {
                Some(feature) => features.push(feature),
                None => log::warn!(
                    "skipping feature #{} ({} geometry): needs a Point and a numeric `{}`",
                    index,
                    kind,
                    MAGNITUDE_PROPERTY
                ),
            }
        }
        Self { features }
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn get(&self, index: usize) -> Option<&GeoFeature> {
        self.features.get(index)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Largest magnitude in the collection, `None` when empty
    pub fn max_magnitude(&self) -> Option<f64> {
        self.features
            .iter()
            .map(|f| f.magnitude)
            .filter(|m| !m.is_nan())
            .fold(None, |max, m| Some(max.map_or(m, |cur: f64| cur.max(m))))
    }
}
