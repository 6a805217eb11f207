//! Tile index resolution
//!
//! Turns a continuous view transform into the discrete set of tiles that cover
//! the viewport, plus one transform for the whole tile group. Tiles are laid
//! out on a fixed local grid (`column * 256`, `row * 256`) and the group
//! transform moves and scales that grid onto the screen, so no tile needs its
//! own screen-space math.

use crate::core::{
    bounds::Bounds,
    constants::TILE_SIZE_F64,
    geo::{Point, TileId},
    transform::ViewTransform,
    viewport::Viewport,
};

/// Highest zoom level the resolver will produce; keeps column/row in `u32`.
pub const MAX_TILE_ZOOM: u8 = 30;

/// Group-level placement of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGroupTransform {
    /// Screen position of the grid origin (tile 0,0 top-left corner)
    pub translate: Point,
    /// Factor applied to the 256 px local grid
    pub scale: f64,
}

impl TileGroupTransform {
    /// Screen-space size of one tile
    pub fn tile_size(&self) -> f64 {
        self.scale * TILE_SIZE_F64
    }

    /// Screen-space rectangle of a tile placed on the local grid
    pub fn tile_bounds(&self, tile: &TileId) -> Bounds {
        let size = self.tile_size();
        Bounds::from_origin_and_size(
            Point::new(
                self.translate.x + tile.x as f64 * size,
                self.translate.y + tile.y as f64 * size,
            ),
            size,
            size,
        )
    }

    /// SVG `transform` attribute for the raster group.
    ///
    /// The translation is snapped to whole pixels when a tile spans a whole
    /// number of pixels, which keeps tile edges crisp.
    pub fn to_svg(&self) -> String {
        let tile_size = self.tile_size();
        let (tx, ty) = if tile_size.fract() == 0.0 {
            (self.translate.x.round(), self.translate.y.round())
        } else {
            (self.translate.x, self.translate.y)
        };
        format!("translate({},{}) scale({})", tx, ty, self.scale)
    }
}

/// Result of one resolution: ordered tile ids and the group transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    /// Row-major (rows outer, columns inner)
    pub tiles: Vec<TileId>,
    pub zoom: u8,
    pub group: TileGroupTransform,
}

impl TileSet {
    /// Number of tiles per axis at this zoom level
    pub fn grid_scale(&self) -> f64 {
        (1u64 << self.zoom) as f64
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: &TileId) -> bool {
        self.tiles.contains(tile)
    }
}

/// Resolves visible tiles for a viewport and transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileResolver;

impl TileResolver {
    pub fn new() -> Self {
        Self
    }

    /// Integer zoom level for a continuous scale.
    ///
    /// Powers of two map exactly; anything in between rounds to the nearest level.
    pub fn zoom_for_scale(scale: f64) -> u8 {
        let z = scale.log2().round();
        if z.is_nan() || z <= 0.0 {
            0
        } else {
            (z as u8).min(MAX_TILE_ZOOM)
        }
    }

    /// Computes the tiles covering `viewport` under `transform`
    pub fn tiles_for(&self, viewport: &Viewport, transform: &ViewTransform) -> TileSet {
        let zoom = Self::zoom_for_scale(transform.k);
        let grid = (1u64 << zoom) as f64;
        let tile_size = TILE_SIZE_F64 * transform.k / grid;
        let origin = transform.origin();

        let columns = Self::index_range(origin.x, viewport.width, tile_size, grid);
        let rows = Self::index_range(origin.y, viewport.height, tile_size, grid);

        let mut tiles = Vec::with_capacity(columns.len() * rows.len());
        for y in rows {
            for x in columns.clone() {
                tiles.push(TileId::new(x, y, zoom));
            }
        }

        log::debug!(
            "resolved {} tiles at z{} (tile size {:.2}px)",
            tiles.len(),
            zoom,
            tile_size
        );

        TileSet {
            tiles,
            zoom,
            group: TileGroupTransform {
                translate: origin,
                scale: tile_size / TILE_SIZE_F64,
            },
        }
    }

    /// Indices of the cells of size `cell` starting at `origin` that overlap
    /// `[0, extent]`, clamped to `[0, grid)`.
    fn index_range(origin: f64, extent: f64, cell: f64, grid: f64) -> std::ops::Range<u32> {
        let first = ((0.0 - origin) / cell).floor().max(0.0);
        let end = ((extent - origin) / cell).ceil().min(grid);
        if !(end > first) {
            return 0..0;
        }
        (first as u32)..(end as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_scales_map_to_zoom() {
        for z in 11u8..=24 {
            let scale = (1u64 << z) as f64;
            assert_eq!(TileResolver::zoom_for_scale(scale), z);
        }
    }

    #[test]
    fn test_fractional_scale_rounds() {
        assert_eq!(TileResolver::zoom_for_scale(2048.0 * 1.3), 11);
        assert_eq!(TileResolver::zoom_for_scale(2048.0 * 1.5), 12);
        assert_eq!(TileResolver::zoom_for_scale(0.25), 0);
    }

    #[test]
    fn test_scenario_origin_at_top_left() {
        let set = TileResolver::new().tiles_for(
            &Viewport::new(960.0, 500.0),
            &ViewTransform::new(16384.0, 0.0, 0.0),
        );
        assert_eq!(set.zoom, 14);
        let expected: Vec<TileId> = (0..2)
            .flat_map(|y| (0..4).map(move |x| TileId::new(x, y, 14)))
            .collect();
        assert_eq!(set.tiles, expected);
        assert_eq!(set.group.scale, 1.0);
        assert_eq!(set.group.to_svg(), "translate(0,0) scale(1)");
    }

    #[test]
    fn test_partial_tiles_at_edges() {
        // grid shifted by half a tile: one extra column and row appear
        let set = TileResolver::new().tiles_for(
            &Viewport::new(960.0, 500.0),
            &ViewTransform::new(4096.0, -128.0, -128.0),
        );
        let columns: Vec<u32> = set.tiles.iter().filter(|t| t.y == 0).map(|t| t.x).collect();
        let rows: Vec<u32> = set.tiles.iter().filter(|t| t.x == 0).map(|t| t.y).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 4]);
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_world_smaller_than_viewport_is_clamped() {
        // at z11 the world is 2048 tiles wide; park it so its last column is on screen
        let k = 2048.0;
        let world = k * 256.0;
        let set = TileResolver::new().tiles_for(
            &Viewport::new(960.0, 500.0),
            &ViewTransform::new(k, 100.0 - world, 0.0),
        );
        assert!(set.tiles.iter().all(|t| t.is_valid()));
        assert!(set.tiles.iter().all(|t| t.x == 2047));
        assert_eq!(set.tiles.len(), 2);
    }

    #[test]
    fn test_grid_entirely_off_screen() {
        let set = TileResolver::new().tiles_for(
            &Viewport::new(960.0, 500.0),
            &ViewTransform::new(2048.0, 2000.0, 0.0),
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_fractional_group_transform() {
        let set = TileResolver::new().tiles_for(
            &Viewport::new(960.0, 500.0),
            &ViewTransform::new(3000.0, -10.5, -20.25),
        );
        assert_eq!(set.zoom, 12);
        let recovered = set.grid_scale() * set.group.scale;
        assert!((recovered - 3000.0).abs() < 1e-9);
        assert_eq!(set.group.translate, Point::new(-10.5, -20.25));
        assert!(set.group.to_svg().starts_with("translate(-10.5,-20.25) scale("));
    }
}
