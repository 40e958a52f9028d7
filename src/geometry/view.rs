use serde::Serialize;

/// Closest zoom the auto-fit will pick
const MAX_ZOOM: f64 = 17.0;
/// Zoom used when the parcel has no extent
const DEFAULT_ZOOM: f64 = 8.0;

/// Initial camera for a web-mercator tile display of the parcel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl MapView {
    /// Centre on the mean of the geographic vertices and zoom to the larger
    /// of the longitude/latitude spans
    pub fn fit(lon_lat: &[(f64, f64)]) -> Option<Self> {
        if lon_lat.is_empty() {
            return None;
        }

        let n = lon_lat.len() as f64;
        let longitude = lon_lat.iter().map(|p| p.0).sum::<f64>() / n;
        let latitude = lon_lat.iter().map(|p| p.1).sum::<f64>() / n;

        let (min_lon, max_lon) = min_max(lon_lat.iter().map(|p| p.0));
        let (min_lat, max_lat) = min_max(lon_lat.iter().map(|p| p.1));
        let max_range = (max_lon - min_lon).max(max_lat - min_lat);

        let zoom = if max_range == 0.0 {
            DEFAULT_ZOOM
        } else {
            MAX_ZOOM.min(DEFAULT_ZOOM - (max_range / 360.0).log2())
        };

        Some(Self {
            longitude,
            latitude,
            zoom,
        })
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_view() {
        let view = MapView::fit(&[(9.0, 45.0), (9.0, 45.0)]).unwrap();
        assert_eq!(view.zoom, 8.0);
        assert_eq!(view.longitude, 9.0);
        assert_eq!(view.latitude, 45.0);
    }

    #[test]
    fn test_zoom_clamped_for_small_parcels() {
        let view = MapView::fit(&[(9.0, 45.0), (9.0001, 45.0001)]).unwrap();
        assert_eq!(view.zoom, 17.0);
    }

    #[test]
    fn test_zoom_for_wide_extent() {
        // 45 degrees across: 8 - log2(1/8) = 11
        let view = MapView::fit(&[(0.0, 0.0), (45.0, 10.0)]).unwrap();
        assert!((view.zoom - 11.0).abs() < 1e-12);
        assert!((view.longitude - 22.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_view() {
        assert!(MapView::fit(&[]).is_none());
    }
}
