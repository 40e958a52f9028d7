use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// WGS84 semi-major axis (m)
const SEMI_MAJOR: f64 = 6_378_137.0;
/// WGS84 flattening
const FLATTENING: f64 = 1.0 / 298.257_223_563;
/// UTM central meridian scale factor
const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

/// Inverse UTM projection from easting/northing to WGS84 longitude/latitude
///
/// Uses Snyder's footpoint-latitude series, which is good to well under a
/// metre within a zone. Only used for display; area and traverse math stay
/// in projected metres.
#[derive(Debug, Clone)]
pub struct Projector {
    zone: u8,
    hemisphere: Hemisphere,
    central_meridian: f64,
}

impl Projector {
    /// Create a projector for a UTM zone (1..=60)
    pub fn utm(zone: u8, hemisphere: Hemisphere) -> Option<Self> {
        if !(1..=60).contains(&zone) {
            return None;
        }
        let central_meridian = (f64::from(zone) - 1.0) * 6.0 - 180.0 + 3.0;
        Some(Self {
            zone,
            hemisphere,
            central_meridian: central_meridian.to_radians(),
        })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// EPSG code of the source CRS (326xx north, 327xx south)
    pub fn epsg(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + u32::from(self.zone)
    }

    /// Project a beacon to (longitude, latitude) in degrees
    pub fn to_geographic(&self, point: Point) -> (f64, f64) {
        let e2 = FLATTENING * (2.0 - FLATTENING);
        let ep2 = e2 / (1.0 - e2);

        let x = point.easting - FALSE_EASTING;
        let y = match self.hemisphere {
            Hemisphere::North => point.northing,
            Hemisphere::South => point.northing - FALSE_NORTHING_SOUTH,
        };

        // Footpoint latitude from the meridional arc
        let m = y / K0;
        let mu = m / (SEMI_MAJOR * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin1, cos1) = phi1.sin_cos();
        let tan1 = phi1.tan();
        let c1 = ep2 * cos1 * cos1;
        let t1 = tan1 * tan1;
        let n1 = SEMI_MAJOR / (1.0 - e2 * sin1 * sin1).sqrt();
        let r1 = SEMI_MAJOR * (1.0 - e2) / (1.0 - e2 * sin1 * sin1).powf(1.5);
        let d = x / (n1 * K0);

        let lat = phi1
            - (n1 * tan1 / r1)
                * (d.powi(2) / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lon = self.central_meridian
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d.powi(5)
                    / 120.0)
                / cos1;

        (lon.to_degrees(), lat.to_degrees())
    }

    /// Project a slice of beacons
    pub fn project_points(&self, points: &[Point]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.to_geographic(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_central_meridian_on_equator() {
        let proj = Projector::utm(32, Hemisphere::North).unwrap();
        let (lon, lat) = proj.to_geographic(Point::new(500_000.0, 0.0));
        assert!((lon - 9.0).abs() < 1e-9);
        assert!(lat.abs() < 1e-9);
    }

    #[test]
    fn test_known_location_zone_31() {
        // Eiffel Tower
        let proj = Projector::utm(31, Hemisphere::North).unwrap();
        let (lon, lat) = proj.to_geographic(Point::new(448_251.8, 5_411_935.4));
        assert!((lon - 2.2945).abs() < 1e-3);
        assert!((lat - 48.8582).abs() < 1e-3);
    }

    #[test]
    fn test_southern_hemisphere() {
        // Sydney, zone 56 south
        let proj = Projector::utm(56, Hemisphere::South).unwrap();
        let (lon, lat) = proj.to_geographic(Point::new(334_786.0, 6_252_080.0));
        assert!((lon - 151.214).abs() < 1e-3);
        assert!((lat + 33.8587).abs() < 1e-3);
    }

    #[test]
    fn test_zone_range() {
        assert!(Projector::utm(0, Hemisphere::North).is_none());
        assert!(Projector::utm(61, Hemisphere::North).is_none());
        assert_eq!(Projector::utm(32, Hemisphere::North).unwrap().epsg(), 32632);
        assert_eq!(Projector::utm(56, Hemisphere::South).unwrap().epsg(), 32756);
    }

    #[test]
    fn test_northing_increases_latitude() {
        let proj = Projector::utm(32, Hemisphere::North).unwrap();
        let (_, lat_a) = proj.to_geographic(Point::new(500_000.0, 5_000_000.0));
        let (_, lat_b) = proj.to_geographic(Point::new(500_000.0, 5_001_000.0));
        // 1 km of northing is roughly 0.009 degrees of latitude
        assert!((lat_b - lat_a - 0.009).abs() < 0.0005);
    }
}
