//! Core constants shared by the projection, the tile resolver and the controller.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use std::f64::consts::PI;

/// Full circle in radians.
pub const TAU: f64 = 2.0 * PI;

/// Square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Tile size as a float, for pixel math.
pub const TILE_SIZE_F64: f64 = TILE_SIZE as f64;

/// Smallest allowed view scale (zoom level 11).
pub const MIN_SCALE: f64 = (1u32 << 11) as f64;

/// Largest allowed view scale (zoom level 24).
pub const MAX_SCALE: f64 = (1u32 << 24) as f64;

/// Scale applied at startup (zoom level 14).
pub const DEFAULT_SCALE: f64 = (1u32 << 14) as f64;

/// Default map center as `(longitude, latitude)`.
pub const DEFAULT_CENTER: (f64, f64) = (-119.665, 37.414);

/// The rendering surface never shrinks below this size.
pub const MIN_SURFACE_WIDTH: f64 = 960.0;
pub const MIN_SURFACE_HEIGHT: f64 = 500.0;

/// Upper end of the magnitude-to-radius range, in pixels.
pub const MAX_POINT_RADIUS: f64 = 10.0;

/// Raster tile endpoint. `{s}` is replaced by a sub-host label.
pub const DEFAULT_TILE_URL: &str =
    "http://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}.png";

/// Sub-host labels used to spread tile downloads.
pub const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Feature collection loaded when nothing else is configured.
pub const DEFAULT_DATA_LOCATION: &str = "data/earthquakes_4326_cali.geojson";

/// Wheel delta divisor (pixels per doubling of scale).
pub const WHEEL_DELTA_DIVISOR: f64 = 500.0;

/// Line/page wheel deltas are scaled to pixels by this factor.
pub const WHEEL_LINE_HEIGHT: f64 = 120.0;
