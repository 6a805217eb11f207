//! One-shot loading of the feature collection
//!
//! The collection is read once at startup. Any failure here is returned to
//! the caller and is meant to stop initialization; nothing is retried.

use crate::data::features::FeatureCollection;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Anything the raw GeoJSON text can be read from.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Reads the whole document
    async fn read(&self) -> Result<String>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Feature collection stored on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeatureSource for FileSource {
    async fn read(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Feature collection served over HTTP(S)
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FeatureSource for HttpSource {
    async fn read(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http://`/`https://` locations and a file otherwise
pub fn source_for(location: &str) -> Box<dyn FeatureSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Reads and parses the feature collection
pub async fn load_features(source: &dyn FeatureSource) -> Result<FeatureCollection> {
    let text = source.read().await?;
    let collection = FeatureCollection::from_geojson_str(&text)?;
    log::info!(
        "loaded {} features from {}",
        collection.len(),
        source.describe()
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InlineSource(&'static str);

    #[async_trait]
    impl FeatureSource for InlineSource {
        async fn read(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "inline".into()
        }
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        let url = "https://example.org/q.geojson";
        assert_eq!(source_for(url).describe(), url);
        assert_eq!(source_for("data/q.geojson").describe(), "data/q.geojson");
    }

    #[tokio::test]
    async fn test_load_inline() {
        let source = InlineSource(
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": { "mag": 3.2 },
                  "geometry": { "type": "Point", "coordinates": [-119.0, 37.0] } } ] }"#,
        );
        let collection = load_features(&source).await.unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileSource::new("does/not/exist.geojson");
        assert!(matches!(load_features(&source).await, Err(crate::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_garbage_is_parse_error() {
        let source = InlineSource("<html>502 Bad Gateway</html>");
        assert!(matches!(load_features(&source).await, Err(crate::Error::ParseError(_))));
    }
}
