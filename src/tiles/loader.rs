use crate::core::geo::TileId;
use crate::{Error, Result};
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::thread;

/// Blocking client shared by all tile threads; tile servers reject requests
/// without a User-Agent. A build failure is kept and reported by every download.
pub(crate) static HTTP_CLIENT: Lazy<std::result::Result<Client, String>> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            log::error!("failed to build tile HTTP client: {}", e);
            e.to_string()
        })
});

/// Image bytes for a tile whose download finished.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTile {
    pub tile: TileId,
    pub bytes: Vec<u8>,
}

/// Starts tile downloads without waiting for them.
///
/// Implementations report successful downloads on their own channel and drop
/// failures on the floor; nothing is retried.
pub trait TileFetcher: Send + Sync {
    fn fetch(&self, tile: TileId, url: String);
}

/// Fetcher that downloads each tile on a detached thread and sends the bytes
/// back over a channel.
pub struct HttpTileLoader {
    tx: Sender<LoadedTile>,
}

impl HttpTileLoader {
    /// Create a new tile loader given a sender to report completed downloads.
    pub fn new(tx: Sender<LoadedTile>) -> Self {
        Self { tx }
    }

    fn download(url: &str) -> Result<Vec<u8>> {
        let client = HTTP_CLIENT
            .as_ref()
            .map_err(|e| Error::ClientUnavailable(e.clone()))?;
        let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

impl TileFetcher for HttpTileLoader {
    fn fetch(&self, tile: TileId, url: String) {
        let tx = self.tx.clone();

        thread::spawn(move || match Self::download(&url) {
            Ok(bytes) => {
                log::debug!("downloaded tile {} ({} bytes)", tile, bytes.len());
                // receiver gone means the map was dropped; nothing left to place
                let _ = tx.send(LoadedTile { tile, bytes });
            }
            Err(e) => {
                log::trace!("tile {} failed: {}", tile, e);
            }
        });
    }
}

/// Fetcher that never touches the network; tiles stay pending forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

impl TileFetcher for OfflineFetcher {
    fn fetch(&self, tile: TileId, url: String) {
        log::trace!("offline: not fetching tile {} from {}", tile, url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    #[test]
    fn test_failed_download_is_swallowed() {
        let (tx, rx) = unbounded();
        let loader = HttpTileLoader::new(tx);
        // nothing listens on port 9 of the loopback interface
        loader.fetch(TileId::new(0, 0, 0), "http://127.0.0.1:9/0/0/0.png".to_string());
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_download_reports_errors() {
        assert!(HTTP_CLIENT.is_ok());
        let result = HttpTileLoader::download("http://127.0.0.1:9/0/0/0.png");
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[test]
    fn test_offline_fetcher_is_silent() {
        OfflineFetcher.fetch(TileId::new(1, 2, 3), "http://example.invalid/3/1/2.png".into());
    }
}
