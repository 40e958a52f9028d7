use serde::Serialize;

/// A beacon position in a metric projected frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub easting: f64,
    pub northing: f64,
}

impl Point {
    pub const fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    pub fn is_finite(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }

    /// Exact bitwise key, so +0.0 and -0.0 are treated like `==` would
    pub(crate) fn key(&self) -> (u64, u64) {
        // Normalise negative zero so the key agrees with `PartialEq`
        let e = if self.easting == 0.0 { 0.0 } else { self.easting };
        let n = if self.northing == 0.0 { 0.0 } else { self.northing };
        (e.to_bits(), n.to_bits())
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.easting, self.northing)
    }
}

impl From<(f64, f64)> for Point {
    fn from((easting, northing): (f64, f64)) -> Self {
        Self::new(easting, northing)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::coord! { x: p.easting, y: p.northing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_key_matches_eq() {
        assert_eq!(Point::new(0.0, 1.0).key(), Point::new(-0.0, 1.0).key());
        assert_ne!(Point::new(0.0, 1.0).key(), Point::new(0.0, 1.5).key());
    }

    #[test]
    fn test_point_from_tuple() {
        let p: Point = (500000.0, 4649776.22).into();
        assert_eq!(p.easting, 500000.0);
        assert_eq!(p.northing, 4649776.22);
        assert!(p.is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
    }
}
