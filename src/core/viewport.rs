use crate::core::{
    bounds::Bounds,
    constants::{MIN_SURFACE_HEIGHT, MIN_SURFACE_WIDTH},
    geo::Point,
};
use serde::{Deserialize, Serialize};

/// Size of the rendering surface in pixels.
///
/// The visible rectangle is always `[0, width] × [0, height]` in screen space;
/// panning and zooming move the map under it, never the rectangle itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of exactly the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Sizes the surface to the window, never smaller than the minimum surface
    pub fn fit_window(window_width: f64, window_height: f64) -> Self {
        Self::fit_window_with_min(
            window_width,
            window_height,
            Point::new(MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT),
        )
    }

    /// Same as [`Viewport::fit_window`] with a custom minimum size
    pub fn fit_window_with_min(window_width: f64, window_height: f64, min: Point) -> Self {
        Self::new(window_width.max(min.x), window_height.max(min.y))
    }

    /// Screen-space center of the surface
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Visible rectangle in screen pixels
    pub fn bounds(&self) -> Bounds {
        Bounds::from_coords(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT)
    }
}
