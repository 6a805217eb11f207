use crate::core::config::TileConfig;
use crate::core::geo::TileId;

/// Trait representing anything that can produce tile URLs for a given tile.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `tile`.
    fn url(&self, tile: TileId) -> String;
}

/// Templated XYZ source that spreads requests over sub-hosts by row.
///
/// The host label is picked with `row % subdomains.len()`, so every tile in
/// the same row goes to the same host and neighbouring rows alternate.
pub struct TemplateSource {
    template: String,
    subdomains: Vec<String>,
}

impl TemplateSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
        }
    }

    /// CARTO Voyager raster basemap on hosts `a`, `b` and `c`
    pub fn carto_voyager() -> Self {
        Self::from_config(&TileConfig::default())
    }

    pub fn from_config(config: &TileConfig) -> Self {
        Self::new(config.url_template.clone(), config.subdomains.clone())
    }

    fn subdomain(&self, tile: TileId) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = (tile.y as usize) % self.subdomains.len();
        &self.subdomains[idx]
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::carto_voyager()
    }
}

impl TileSource for TemplateSource {
    fn url(&self, tile: TileId) -> String {
        self.template
            .replace("{s}", self.subdomain(tile))
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voyager_url() {
        let source = TemplateSource::carto_voyager();
        assert_eq!(
            source.url(TileId::new(2800, 6330, 14)),
            "http://a.basemaps.cartocdn.com/rastertiles/voyager/14/2800/6330.png"
        );
    }

    #[test]
    fn test_subdomain_follows_row() {
        let source = TemplateSource::carto_voyager();
        let host = |y| {
            let url = source.url(TileId::new(7, y, 12));
            url[7..8].to_string()
        };
        assert_eq!(host(0), "a");
        assert_eq!(host(1), "b");
        assert_eq!(host(2), "c");
        assert_eq!(host(3), "a");
        // the column never changes the host
        assert_eq!(
            &source.url(TileId::new(0, 4, 12))[7..8],
            &source.url(TileId::new(99, 4, 12))[7..8]
        );
    }

    #[test]
    fn test_custom_template() {
        let source = TemplateSource::new("https://{s}.tiles.test/{z}-{x}-{y}", vec!["x".into()]);
        assert_eq!(source.url(TileId::new(1, 2, 3)), "https://x.tiles.test/3-1-2");
    }
}
