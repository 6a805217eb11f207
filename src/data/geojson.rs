use serde::{Deserialize, Serialize};

/// GeoJSON position: `[longitude, latitude]` with an optional altitude/depth
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

impl GeoJsonGeometry {
    /// Longitude and latitude of a `Point` geometry
    pub fn point_lng_lat(&self) -> Option<(f64, f64)> {
        match self {
            GeoJsonGeometry::Point { coordinates } if coordinates.len() >= 2 => {
                Some((coordinates[0], coordinates[1]))
            }
            _ => None,
        }
    }

    /// Name of the geometry type, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            GeoJsonGeometry::Point { .. } => "Point",
            GeoJsonGeometry::LineString { .. } => "LineString",
            GeoJsonGeometry::Polygon { .. } => "Polygon",
            GeoJsonGeometry::MultiPoint { .. } => "MultiPoint",
            GeoJsonGeometry::MultiLineString { .. } => "MultiLineString",
            GeoJsonGeometry::MultiPolygon { .. } => "MultiPolygon",
            GeoJsonGeometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn parse(text: &str) -> crate::Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    /// All features of the document, in file order
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
        }
    }
}
