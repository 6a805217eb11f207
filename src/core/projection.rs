//! Spherical mercator projection driven by the view transform.
//!
//! The projection is never stored on its own: [`Projection::from_transform`]
//! derives it from the current [`ViewTransform`] on every render, which is
//! what keeps the vector overlay aligned with the raster tiles.

use crate::core::{
    constants::{TAU, TILE_SIZE_F64},
    geo::{LatLng, Point},
    transform::ViewTransform,
};
use std::f64::consts::FRAC_PI_4;

/// Mercator projection parameterized by a scale and a translate.
///
/// `scale` is pixels per radian of longitude; `translate` is where the
/// point `(0°, 0°)` lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub translate: Point,
}

impl Projection {
    pub fn new(scale: f64, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// Projection into world coordinates (zoom-0 tile pixels).
    ///
    /// One full revolution spans one tile; the world center sits at `(128, 128)`.
    pub fn unit() -> Self {
        let half = TILE_SIZE_F64 / 2.0;
        Self::new(TILE_SIZE_F64 / TAU, Point::new(half, half))
    }

    /// Projection matching a view transform: the transform's scale is divided
    /// by τ and the translate follows the world center.
    pub fn from_transform(transform: &ViewTransform) -> Self {
        let unit = Self::unit();
        Self::new(
            transform.k * unit.scale,
            transform.apply(&unit.translate),
        )
    }

    /// Projects a geographic coordinate to pixels
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let lambda = lat_lng.lng.to_radians();
        let phi = lat_lng.lat.to_radians();
        Point::new(
            self.translate.x + self.scale * lambda,
            self.translate.y - self.scale * (FRAC_PI_4 + phi / 2.0).tan().ln(),
        )
    }

    /// Maps pixels back to a geographic coordinate
    pub fn invert(&self, pixel: &Point) -> LatLng {
        let lambda = (pixel.x - self.translate.x) / self.scale;
        let phi = 2.0 * ((self.translate.y - pixel.y) / self.scale).exp().atan()
            - std::f64::consts::FRAC_PI_2;
        LatLng::new(phi.to_degrees(), lambda.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_unit_projection_spans_one_tile() {
        let p = Projection::unit();
        let west = p.project(&LatLng::new(0.0, -180.0));
        let east = p.project(&LatLng::new(0.0, 180.0));
        let origin = p.project(&LatLng::new(0.0, 0.0));
        assert!(approx(west.x, 0.0));
        assert!(approx(east.x, 256.0));
        assert!(approx(origin.y, 128.0));

        let north = p.project(&LatLng::new(85.0511287798, 0.0));
        assert!(north.y.abs() < 1e-3);
    }

    #[test]
    fn test_invert_round_trip() {
        let transform = ViewTransform::new(16384.0, -2_000_000.0, -1_500_000.0);
        let p = Projection::from_transform(&transform);
        let coord = LatLng::new(37.414, -119.665);
        let back = p.invert(&p.project(&coord));
        assert!(approx(back.lat, coord.lat));
        assert!(approx(back.lng, coord.lng));
    }

    #[test]
    fn test_matches_tile_grid() {
        // The north-west corner of tile (x, y) at zoom z must project to x*256, y*256
        // when the transform is k = 2^z with no translation.
        let z = 5;
        let k = (1u32 << z) as f64;
        let p = Projection::from_transform(&ViewTransform::new(k, 0.0, 0.0));
        let (tx, ty) = (9.0, 12.0);
        let n = k;
        let lng = tx / n * 360.0 - 180.0;
        let lat = (std::f64::consts::PI * (1.0 - 2.0 * ty / n)).sinh().atan().to_degrees();
        let pixel = p.project(&LatLng::new(lat, lng));
        assert!(approx(pixel.x, tx * 256.0));
        assert!((pixel.y - ty * 256.0).abs() < 1e-4);
    }
}
