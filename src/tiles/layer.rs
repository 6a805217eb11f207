//! Live raster tile group
//!
//! Holds the tiles of the most recent render. Every render replaces the set
//! wholesale: tiles that dropped out are forgotten, new ones get a fresh
//! download. There is no cache: a tile that scrolls out and back in is
//! downloaded again.

use super::{
    diff::TileDiff,
    loader::{HttpTileLoader, LoadedTile, OfflineFetcher, TileFetcher},
    resolver::{TileGroupTransform, TileSet},
    source::TileSource,
};
use crate::core::{constants::TILE_SIZE_F64, geo::{Point, TileId}};
use crossbeam_channel::{unbounded, Receiver};
use fxhash::FxHashMap;

/// Download state of one placed tile
#[derive(Debug, Clone, PartialEq)]
pub enum TileState {
    Pending,
    Loaded(Vec<u8>),
}

/// One tile element inside the raster group
#[derive(Debug, Clone, PartialEq)]
pub struct TileImage {
    pub id: TileId,
    pub url: String,
    /// Position on the group's local 256 px grid
    pub position: Point,
    pub state: TileState,
}

impl TileImage {
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, TileState::Loaded(_))
    }
}

pub struct RasterLayer {
    source: Box<dyn TileSource>,
    fetcher: Box<dyn TileFetcher>,
    loaded_rx: Receiver<LoadedTile>,
    order: Vec<TileId>,
    images: FxHashMap<TileId, TileImage>,
    group: Option<TileGroupTransform>,
}

impl RasterLayer {
    /// Create a layer with an explicit fetcher and the channel it reports on
    pub fn new(
        source: Box<dyn TileSource>,
        fetcher: Box<dyn TileFetcher>,
        loaded_rx: Receiver<LoadedTile>,
    ) -> Self {
        Self {
            source,
            fetcher,
            loaded_rx,
            order: Vec::new(),
            images: FxHashMap::default(),
            group: None,
        }
    }

    /// Layer that downloads tiles over HTTP
    pub fn http(source: Box<dyn TileSource>) -> Self {
        let (tx, rx) = unbounded();
        Self::new(source, Box::new(HttpTileLoader::new(tx)), rx)
    }

    /// Layer that never downloads anything (headless rendering, tests)
    pub fn offline(source: Box<dyn TileSource>) -> Self {
        let (_tx, rx) = unbounded();
        Self::new(source, Box::new(OfflineFetcher), rx)
    }

    /// Replaces the displayed tiles with `set`, returning what changed
    pub fn update(&mut self, set: &TileSet) -> TileDiff {
        let diff = TileDiff::between(&self.order, &set.tiles);

        for id in &diff.removed {
            self.images.remove(id);
        }

        for id in &diff.added {
            let url = self.source.url(*id);
            self.images.insert(
                *id,
                TileImage {
                    id: *id,
                    url: url.clone(),
                    position: Point::new(id.x as f64 * TILE_SIZE_F64, id.y as f64 * TILE_SIZE_F64),
                    state: TileState::Pending,
                },
            );
            self.fetcher.fetch(*id, url);
        }

        self.order = set.tiles.clone();
        self.group = Some(set.group);

        if !diff.is_empty() {
            log::debug!(
                "raster: +{} -{} tiles ({} shown)",
                diff.added.len(),
                diff.removed.len(),
                self.order.len()
            );
        }

        diff
    }

    /// Places every download that finished since the last call.
    ///
    /// Results for tiles no longer displayed are discarded. Returns the number
    /// of tiles placed.
    pub fn poll_loaded(&mut self) -> usize {
        let mut placed = 0;
        for loaded in self.loaded_rx.try_iter() {
            match self.images.get_mut(&loaded.tile) {
                Some(image) => {
                    image.state = TileState::Loaded(loaded.bytes);
                    placed += 1;
                }
                None => log::trace!("discarding late tile {}", loaded.tile),
            }
        }
        placed
    }

    /// Tiles in display order
    pub fn images(&self) -> impl Iterator<Item = &TileImage> {
        self.order.iter().filter_map(move |id| self.images.get(id))
    }

    pub fn tile(&self, id: &TileId) -> Option<&TileImage> {
        self.images.get(id)
    }

    pub fn tile_ids(&self) -> &[TileId] {
        &self.order
    }

    /// Group transform of the last update, if any
    pub fn group(&self) -> Option<TileGroupTransform> {
        self.group
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.images.values().filter(|img| !img.is_loaded()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::source::TemplateSource;
    use crossbeam_channel::Sender;
    use std::sync::{Arc, Mutex};

    /// Records requests and answers each one immediately with its url as bytes
    struct EchoFetcher {
        requests: Arc<Mutex<Vec<TileId>>>,
        tx: Sender<LoadedTile>,
    }

    impl TileFetcher for EchoFetcher {
        fn fetch(&self, tile: TileId, url: String) {
            self.requests.lock().unwrap().push(tile);
            self.tx.send(LoadedTile { tile, bytes: url.into_bytes() }).unwrap();
        }
    }

    fn layer() -> (RasterLayer, Arc<Mutex<Vec<TileId>>>, Sender<LoadedTile>) {
        let (tx, rx) = unbounded();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let fetcher = EchoFetcher { requests: requests.clone(), tx: tx.clone() };
        let source = Box::new(TemplateSource::carto_voyager());
        let layer = RasterLayer::new(source, Box::new(fetcher), rx);
        (layer, requests, tx)
    }

    fn set(tiles: Vec<TileId>) -> TileSet {
        let zoom = tiles.first().map(|t| t.z).unwrap_or(0);
        TileSet {
            tiles,
            zoom,
            group: TileGroupTransform { translate: Point::new(0.0, 0.0), scale: 1.0 },
        }
    }

    #[test]
    fn test_update_fetches_only_new_tiles() {
        let (mut layer, requests, _tx) = layer();
        layer.update(&set(vec![TileId::new(0, 0, 14), TileId::new(1, 0, 14)]));
        layer.update(&set(vec![TileId::new(1, 0, 14), TileId::new(2, 0, 14)]));

        assert_eq!(
            *requests.lock().unwrap(),
            vec![TileId::new(0, 0, 14), TileId::new(1, 0, 14), TileId::new(2, 0, 14)]
        );
        assert_eq!(layer.tile_ids(), &[TileId::new(1, 0, 14), TileId::new(2, 0, 14)]);
        assert!(layer.tile(&TileId::new(0, 0, 14)).is_none());
    }

    #[test]
    fn test_revisited_tile_is_refetched() {
        let (mut layer, requests, _tx) = layer();
        let a = TileId::new(5, 5, 12);
        let b = TileId::new(6, 5, 12);
        layer.update(&set(vec![a]));
        layer.update(&set(vec![b]));
        layer.update(&set(vec![a]));
        assert_eq!(*requests.lock().unwrap(), vec![a, b, a]);
    }

    #[test]
    fn test_poll_places_loaded_and_drops_abandoned() {
        let (mut layer, _requests, tx) = layer();
        let kept = TileId::new(1, 1, 13);
        let gone = TileId::new(2, 1, 13);
        layer.update(&set(vec![kept, gone]));
        layer.update(&set(vec![kept]));

        // a straggler for a tile that is not displayed anymore
        tx.send(LoadedTile { tile: TileId::new(9, 9, 13), bytes: vec![1] }).unwrap();

        // `kept` and `gone` were echoed on the first update; only `kept` is placed
        assert_eq!(layer.poll_loaded(), 1);
        let image = layer.tile(&kept).unwrap();
        assert!(image.is_loaded());
        assert_eq!(image.position, Point::new(256.0, 256.0));
        assert_eq!(layer.pending_count(), 0);
    }

    #[test]
    fn test_offline_layer_keeps_tiles_pending() {
        let mut layer = RasterLayer::offline(Box::new(TemplateSource::carto_voyager()));
        layer.update(&set(vec![TileId::new(0, 1, 11)]));
        assert_eq!(layer.poll_loaded(), 0);
        assert_eq!(layer.pending_count(), 1);
        let urls: Vec<&str> = layer.images().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["http://b.basemaps.cartocdn.com/rastertiles/voyager/11/0/1.png"]);
    }
}
