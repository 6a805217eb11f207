//! Earthquake point overlay
//!
//! Every feature becomes one circle at its projected position, sized by the
//! magnitude scale. Points are re-projected on every render; there is no
//! culling, so off-screen points are kept too.

use crate::{
    core::{geo::Point, projection::Projection},
    data::{features::FeatureCollection, scale::RadiusScale, GeoFeature},
};

/// Callback fired when the pointer enters a point
pub type HoverCallback = Box<dyn FnMut(&GeoFeature) + Send>;

/// One drawn point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedPoint {
    /// Index of the feature in the collection
    pub index: usize,
    pub center: Point,
    /// Radius in pixels, never negative
    pub radius: f64,
}

impl RenderedPoint {
    pub fn contains(&self, position: &Point) -> bool {
        self.radius > 0.0 && self.center.distance_to(position) <= self.radius
    }

    /// SVG path data for the circle: move to the center, step to the bottom
    /// edge and draw two half arcs.
    pub fn path_data(&self) -> String {
        let Point { x, y } = self.center;
        let r = self.radius;
        format!(
            "M{},{}m0,{}a{},{} 0 1,1 0,{}a{},{} 0 1,1 0,{}z",
            x,
            y,
            r,
            r,
            r,
            -2.0 * r,
            r,
            r,
            2.0 * r
        )
    }
}

pub struct OverlayLayer {
    features: FeatureCollection,
    radius: RadiusScale,
    points: Vec<RenderedPoint>,
    hovered: Option<usize>,
    on_hover: Option<HoverCallback>,
}

impl OverlayLayer {
    pub fn new(features: FeatureCollection, radius: RadiusScale) -> Self {
        Self {
            features,
            radius,
            points: Vec::new(),
            hovered: None,
            on_hover: None,
        }
    }

    /// Registers the pointer-enter callback
    pub fn on_hover<F>(&mut self, callback: F)
    where
        F: FnMut(&GeoFeature) + Send + 'static,
    {
        self.on_hover = Some(Box::new(callback));
    }

    /// Re-projects every feature
    pub fn render(&mut self, projection: &Projection) {
        let radius = self.radius;
        self.points = self
            .features
            .features()
            .iter()
            .enumerate()
            .map(|(index, feature)| RenderedPoint {
                index,
                center: projection.project(&feature.location),
                radius: radius.radius(feature.magnitude).max(0.0),
            })
            .collect();
    }

    /// Points of the last render, in feature order (later points draw on top)
    pub fn points(&self) -> &[RenderedPoint] {
        &self.points
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn radius_scale(&self) -> &RadiusScale {
        &self.radius
    }

    /// Topmost point under `position`
    pub fn hit_test(&self, position: &Point) -> Option<&RenderedPoint> {
        self.points.iter().rev().find(|p| p.contains(position))
    }

    /// Tracks the pointer and fires the hover callback when it enters a point.
    ///
    /// Returns the feature under the pointer, if any.
    pub fn pointer_move(&mut self, position: &Point) -> Option<&GeoFeature> {
        let hit = self.hit_test(position).map(|p| p.index);

        if hit != self.hovered {
            self.hovered = hit;
            if let Some(feature) = hit.and_then(|i| self.features.get(i)) {
                log::debug!("hover: {:?}", feature);
                if let Some(callback) = self.on_hover.as_mut() {
                    callback(feature);
                }
            }
        }

        hit.and_then(|i| self.features.get(i))
    }

    pub fn hovered(&self) -> Option<&GeoFeature> {
        self.hovered.and_then(|i| self.features.get(i))
    }
}
