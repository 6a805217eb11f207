use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from GeoJSON `[longitude, latitude]` order
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Identity of one raster tile in the slippy map grid.
///
/// `x` is the column and `y` the row at zoom level `z`. Two tiles are the
/// same tile exactly when all three components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileId {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles per axis at this tile's zoom level
    pub fn grid_size(&self) -> u64 {
        1u64 << self.z
    }

    /// Checks if the tile is inside the grid for its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = self.grid_size();
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::from_lng_lat(-119.665, 37.414);
        assert_eq!(coord.lat, 37.414);
        assert_eq!(coord.lng, -119.665);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.add(&b), Point::new(5.0, 8.0));
        assert_eq!(b.subtract(&a), Point::new(3.0, 4.0));
        assert_eq!(a.multiply(2.0), Point::new(2.0, 4.0));
        assert_eq!(a.midpoint(&b), Point::new(2.5, 4.0));
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_tile_id_validity() {
        assert!(TileId::new(0, 0, 0).is_valid());
        assert!(!TileId::new(1, 0, 0).is_valid());
        assert!(TileId::new(16383, 16383, 14).is_valid());
        assert!(!TileId::new(16384, 0, 14).is_valid());
        assert_eq!(TileId::new(3, 1, 14).to_string(), "14/3/1");
    }
}
