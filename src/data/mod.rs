pub mod features;
pub mod geojson;
pub mod scale;
#[cfg(feature = "tokio-runtime")]
pub mod source;

pub use features::{FeatureCollection, GeoFeature};
pub use scale::RadiusScale;
