use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Continuous pan/zoom state of the map.
///
/// World coordinates are zoom-0 tile pixels, so the whole mercator world is
/// the square `[0, 256] × [0, 256]`. A world point `w` is drawn on screen at
/// `w * k + (x, y)`; `(x, y)` is therefore where the world's top-left corner
/// (the tile grid origin) lands, and at `k = 2^z` the world is exactly
/// `2^z` tiles of 256 px across.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Scale factor (tile-grid scale)
    pub k: f64,
    /// Horizontal translation in screen pixels
    pub x: f64,
    /// Vertical translation in screen pixels
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Returns a copy translated by `(tx, ty)` in world units
    pub fn translate(&self, tx: f64, ty: f64) -> Self {
        Self::new(self.k, self.x + self.k * tx, self.y + self.k * ty)
    }

    /// Returns a copy with the scale multiplied by `factor` (origin kept)
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.k * factor, self.x, self.y)
    }

    /// Maps a world point to screen space
    pub fn apply(&self, world: &Point) -> Point {
        Point::new(world.x * self.k + self.x, world.y * self.k + self.y)
    }

    /// Maps a screen point back to world space
    pub fn invert(&self, screen: &Point) -> Point {
        Point::new((screen.x - self.x) / self.k, (screen.y - self.y) / self.k)
    }

    /// Screen position of the world's top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when the scale and translation are all finite numbers
    pub fn is_finite(&self) -> bool {
        self.k.is_finite() && self.x.is_finite() && self.y.is_finite()
    }

    /// Returns a copy shifted by a screen-space delta
    pub fn pan_by(&self, delta: &Point) -> Self {
        Self::new(self.k, self.x + delta.x, self.y + delta.y)
    }

    /// Returns a copy at scale `k` with `focus` (screen space) left in place
    pub fn zoom_around(&self, k: f64, focus: &Point) -> Self {
        let world = self.invert(focus);
        Self::anchored(k, &world, focus)
    }

    /// Transform at scale `k` that draws `world` at `screen`
    pub fn anchored(k: f64, world: &Point, screen: &Point) -> Self {
        Self::new(k, screen.x - world.x * k, screen.y - world.y * k)
    }

    /// Returns a copy with the scale clamped to `[min, max]`, keeping `focus` fixed
    pub fn clamp_scale(&self, min: f64, max: f64, focus: &Point) -> Self {
        let k = self.k.clamp(min, max);
        if k == self.k {
            *self
        } else {
            self.zoom_around(k, focus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_invert() {
        let t = ViewTransform::new(4.0, 10.0, -20.0);
        let world = Point::new(3.0, 5.0);
        let screen = t.apply(&world);
        assert_eq!(screen, Point::new(22.0, 0.0));
        assert_eq!(t.invert(&screen), world);
    }

    #[test]
    fn test_builder_chain_matches_centering() {
        // translate(w/2, h/2) . scale(k) . translate(-c)
        let center = Point::new(40.0, 90.0);
        let t = ViewTransform::identity()
            .translate(480.0, 250.0)
            .scale(16.0)
            .translate(-center.x, -center.y);
        assert_eq!(t.apply(&center), Point::new(480.0, 250.0));
        assert_eq!(t, ViewTransform::anchored(16.0, &center, &Point::new(480.0, 250.0)));
    }

    #[test]
    fn test_zoom_around_keeps_focus() {
        let t = ViewTransform::new(2048.0, -1000.0, 300.0);
        let focus = Point::new(123.0, 456.0);
        let zoomed = t.zoom_around(4096.0, &focus);
        let before = t.invert(&focus);
        let after = zoomed.invert(&focus);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(zoomed.k, 4096.0);
    }

    #[test]
    fn test_clamp_scale() {
        let t = ViewTransform::new(10.0, 0.0, 0.0);
        let focus = Point::new(50.0, 50.0);
        assert_eq!(t.clamp_scale(1.0, 100.0, &focus), t);
        let clamped = t.clamp_scale(20.0, 100.0, &focus);
        assert_eq!(clamped.k, 20.0);
        assert_eq!(clamped.apply(&t.invert(&focus)), focus);
    }
}
