use crate::core::constants::MAX_POINT_RADIUS;
use crate::data::features::FeatureCollection;

/// Square-root scale from magnitude to point radius.
///
/// Maps the domain `[0, max_magnitude]` onto `[0, max_radius]` so that a
/// point's area, not its radius, grows linearly with magnitude. Values outside
/// the domain extrapolate with the same curve (negative magnitudes give
/// negative radii). A degenerate domain maps everything to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    max_magnitude: f64,
    max_radius: f64,
}

impl RadiusScale {
    pub fn new(max_magnitude: f64, max_radius: f64) -> Self {
        Self {
            max_magnitude,
            max_radius,
        }
    }

    /// Scale whose domain ends at the strongest feature of `collection`
    pub fn for_collection(collection: &FeatureCollection, max_radius: f64) -> Self {
        Self::new(collection.max_magnitude().unwrap_or(0.0), max_radius)
    }

    /// Scale for `collection` with the default 10 px range
    pub fn with_default_range(collection: &FeatureCollection) -> Self {
        Self::for_collection(collection, MAX_POINT_RADIUS)
    }

    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.max_magnitude)
    }

    pub fn range(&self) -> (f64, f64) {
        (0.0, self.max_radius)
    }

    /// Radius in pixels for a magnitude
    pub fn radius(&self, magnitude: f64) -> f64 {
        let span = signed_sqrt(self.max_magnitude);
        if span == 0.0 || span.is_nan() {
            return 0.0;
        }
        signed_sqrt(magnitude) / span * self.max_radius
    }
}

fn signed_sqrt(value: f64) -> f64 {
    if value < 0.0 {
        -(-value).sqrt()
    } else {
        value.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::data::features::GeoFeature;

    fn collection(mags: &[f64]) -> FeatureCollection {
        FeatureCollection::new(
            mags.iter()
                .map(|m| GeoFeature::new(LatLng::new(0.0, 0.0), *m))
                .collect(),
        )
    }

    #[test]
    fn test_endpoints() {
        for mags in [&[1.0, 2.0, 4.5][..], &[0.3][..], &[7.1, 0.0, 3.3][..]] {
            let scale = RadiusScale::with_default_range(&collection(mags));
            assert_eq!(scale.radius(0.0), 0.0);
            let max = mags.iter().cloned().fold(f64::MIN, f64::max);
            assert!((scale.radius(max) - 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sqrt_curve() {
        let scale = RadiusScale::new(4.0, 10.0);
        assert_eq!(scale.radius(1.0), 5.0);
        assert_eq!(scale.radius(-1.0), -5.0);
        assert!(scale.radius(2.0) < scale.radius(3.0));
        assert_eq!(scale.domain(), (0.0, 4.0));
        assert_eq!(scale.range(), (0.0, 10.0));
    }

    #[test]
    fn test_degenerate_domain() {
        assert_eq!(RadiusScale::with_default_range(&collection(&[])).radius(3.0), 0.0);
        assert_eq!(RadiusScale::with_default_range(&collection(&[0.0])).radius(0.0), 0.0);
    }
}
