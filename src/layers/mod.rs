pub mod overlay;

pub use overlay::{HoverCallback, OverlayLayer, RenderedPoint};
