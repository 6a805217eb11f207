//! # quakemap
//!
//! Earthquake locations drawn as magnitude-sized circles over slippy-map
//! raster tiles.
//!
//! A single [`ViewTransform`] drives both layers: the mercator
//! [`Projection`] used by the point overlay and the tile set computed by the
//! [`TileResolver`] are both derived from it on every change, so the points
//! and the basemap pan and zoom together with pixel alignment.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    config::MapConfig,
    geo::{LatLng, Point, TileId},
    map::{MapOptions, QuakeMap},
    projection::Projection,
    transform::ViewTransform,
    viewport::Viewport,
};

pub use data::{FeatureCollection, GeoFeature, RadiusScale};

pub use input::{EventHandled, InputEvent, RenderTarget, TransformController};

pub use layers::OverlayLayer;

pub use rendering::render_svg;

pub use tiles::{RasterLayer, TemplateSource, TileDiff, TileResolver, TileSet, TileSource};

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;
