pub mod diff;
pub mod layer;
pub mod loader;
pub mod resolver;
pub mod source;

// Re-exports for convenience
pub use diff::TileDiff;
pub use layer::{RasterLayer, TileImage, TileState};
pub use loader::{HttpTileLoader, LoadedTile, OfflineFetcher, TileFetcher};
pub use resolver::{TileGroupTransform, TileResolver, TileSet};
pub use source::{TemplateSource, TileSource};
