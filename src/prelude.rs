//! Prelude module for common quakemap types and traits
//!
//! `use quakemap::prelude::*;` brings in everything needed to build a map,
//! feed it events and render it.

pub use crate::core::{
    bounds::Bounds,
    config::{DataConfig, MapConfig, OverlayConfig, TileConfig, ViewConfig},
    geo::{LatLng, Point, TileId},
    map::{MapOptions, QuakeMap},
    projection::Projection,
    transform::ViewTransform,
    viewport::Viewport,
};

pub use crate::data::{features::FeatureCollection, features::GeoFeature, scale::RadiusScale};

#[cfg(feature = "tokio-runtime")]
pub use crate::data::source::{load_features, source_for, FeatureSource};

pub use crate::input::{
    controller::{RenderTarget, TransformController},
    events::{EventHandled, InputEvent, WheelDeltaMode},
};

pub use crate::layers::overlay::{OverlayLayer, RenderedPoint};

pub use crate::tiles::{
    RasterLayer, TemplateSource, TileDiff, TileFetcher, TileGroupTransform, TileResolver, TileSet,
    TileSource,
};

pub use crate::rendering::svg::render_svg;

pub use crate::{Error, MapError, Result};
