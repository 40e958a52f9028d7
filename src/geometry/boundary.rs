//! Closed parcel rings
//!
//! A [`Boundary`] can only be built through [`normalize`], so every value is a
//! closed ring (first beacon repeated at the end) with at least three distinct
//! beacons. Simplicity and non-zero area are checked separately by
//! [`Boundary::check`], since a surveyor may want to see *why* a ring failed.

use std::collections::HashSet;

use geo::Line;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use tracing::debug;

use super::area::shoelace;
use super::scaling::Bounds;
use crate::domain::Point;
use crate::error::{BoundaryDefect, ParcelResult};

/// Relative tolerance for treating a ring as zero-area, scaled by extent²
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// An ordered, closed ring of beacons in traverse order
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    points: Vec<Point>,
}

/// Close an open ring and reject rings with fewer than three distinct beacons.
///
/// The closing point is only appended when the first and last points differ
/// exactly; applying this to an already-normalized ring returns it unchanged.
pub fn normalize(points: &[Point]) -> ParcelResult<Boundary> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(BoundaryDefect::NonFinite { index }.into());
    }

    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Err(BoundaryDefect::TooFewPoints { distinct: 0 }.into());
    };

    let mut ring = points.to_vec();
    if first != last {
        debug!(
            easting = first.easting,
            northing = first.northing,
            "closing open ring"
        );
        ring.push(first);
    }

    let distinct = ring.iter().map(Point::key).collect::<HashSet<_>>().len();
    if distinct < 3 {
        return Err(BoundaryDefect::TooFewPoints { distinct }.into());
    }

    Ok(Boundary { points: ring })
}

impl Boundary {
    /// Ring vertices, including the closing repeat of the first beacon
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Beacons without the closing repeat
    pub fn beacons(&self) -> &[Point] {
        &self.points[..self.points.len() - 1]
    }

    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Edge `i` as (start, end)
    pub fn edge(&self, i: usize) -> (Point, Point) {
        (self.points[i], self.points[i + 1])
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn bounds(&self) -> Bounds {
        let coords: Vec<(f64, f64)> = self.points.iter().map(Point::as_tuple).collect();
        // A Boundary always has points, so this never falls back
        Bounds::from_points(&coords).unwrap_or(Bounds {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        })
    }

    /// Same ring traversed in the opposite direction, starting at the same beacon
    pub fn reversed(&self) -> Boundary {
        let mut points = self.points.clone();
        points.reverse();
        Boundary { points }
    }

    /// True iff the ring is simple and encloses positive area
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Like [`Boundary::validate`] but reports the defect that was found
    pub fn check(&self) -> ParcelResult<()> {
        let result = self.find_defect().map_or(Ok(()), |d| Err(d.into()));
        if let Err(ref e) = result {
            debug!(edges = self.edge_count(), error = %e, "boundary rejected");
        }
        result
    }

    fn find_defect(&self) -> Option<BoundaryDefect> {
        let tolerance = self.degenerate_tolerance();

        if self.is_collinear(tolerance) {
            return Some(BoundaryDefect::ZeroArea);
        }

        if let Some((first, second)) = self.first_crossing() {
            return Some(BoundaryDefect::SelfIntersecting { first, second });
        }

        if shoelace(&self.points).abs() <= tolerance {
            return Some(BoundaryDefect::ZeroArea);
        }

        None
    }

    fn degenerate_tolerance(&self) -> f64 {
        let bounds = self.bounds();
        let extent = bounds.width().max(bounds.height());
        DEGENERATE_TOLERANCE * extent * extent
    }

    fn is_collinear(&self, tolerance: f64) -> bool {
        let origin = self.points[0];
        let Some(other) = self.points.iter().find(|p| **p != origin) else {
            return true;
        };
        let (ax, ay) = (other.easting - origin.easting, other.northing - origin.northing);

        self.points.iter().all(|p| {
            let (bx, by) = (p.easting - origin.easting, p.northing - origin.northing);
            (ax * by - ay * bx).abs() <= tolerance
        })
    }

    /// First pair of edges that cross, overlap or touch away from a shared vertex.
    ///
    /// Zero-length edges from repeated consecutive beacons are skipped; they
    /// carry no direction and cannot make the ring non-simple on their own.
    fn first_crossing(&self) -> Option<(usize, usize)> {
        let edges: Vec<(usize, Line<f64>)> = self
            .edges()
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, (a, b))| (i, Line::new(a, b)))
            .collect();
        let n = edges.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                let (ei, line_i) = edges[i];
                let (ej, line_j) = edges[j];

                match line_intersection(line_i, line_j) {
                    None => {}
                    Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                    Some(LineIntersection::Collinear { intersection })
                        if adjacent && intersection.start == intersection.end => {}
                    Some(_) => return Some((ei, ej)),
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_normalize_closes_open_ring() {
        let ring = normalize(&pts(&[(0.0, 0.0), (0.0, 5.0), (5.0, 5.0)])).unwrap();
        assert_eq!(ring.points().len(), 4);
        assert_eq!(ring.points()[3], Point::new(0.0, 0.0));
        assert_eq!(ring.edge_count(), 3);
        assert_eq!(ring.beacons().len(), 3);
    }

    #[test]
    fn test_normalize_keeps_closed_ring() {
        let input = pts(&[(0.0, 0.0), (0.0, 5.0), (5.0, 5.0), (0.0, 0.0)]);
        let ring = normalize(&input).unwrap();
        assert_eq!(ring.points(), input.as_slice());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&pts(&[(1.0, 1.0), (4.0, 1.0), (4.0, 3.0)])).unwrap();
        let twice = normalize(once.points()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_too_few_distinct() {
        let err = normalize(&pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(BoundaryDefect::TooFewPoints { distinct: 2 })
        );

        let err = normalize(&pts(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0), (2.0, 2.0)])).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(BoundaryDefect::TooFewPoints { distinct: 1 })
        );

        let err = normalize(&[]).unwrap_err();
        assert_eq!(
            err.defect(),
            Some(BoundaryDefect::TooFewPoints { distinct: 0 })
        );
    }

    #[test]
    fn test_normalize_rejects_nan() {
        let err = normalize(&pts(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)])).unwrap_err();
        assert_eq!(err.defect(), Some(BoundaryDefect::NonFinite { index: 1 }));
    }

    #[test]
    fn test_validate_square() {
        let ring = normalize(&pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])).unwrap();
        assert!(ring.validate());
        assert!(ring.reversed().validate());
    }

    #[test]
    fn test_validate_bowtie() {
        let ring = normalize(&pts(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)])).unwrap();
        assert!(!ring.validate());
        assert_eq!(
            ring.check().unwrap_err().defect(),
            Some(BoundaryDefect::SelfIntersecting {
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_validate_collinear() {
        let ring = normalize(&pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)])).unwrap();
        assert!(!ring.validate());
        assert_eq!(
            ring.check().unwrap_err().defect(),
            Some(BoundaryDefect::ZeroArea)
        );
    }

    #[test]
    fn test_validate_spike_overlaps_itself() {
        // Goes out along an edge and doubles back over part of it
        let ring = normalize(&pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (10.0, 5.0),
            (0.0, 10.0),
        ]))
        .unwrap();
        assert!(!ring.validate());
    }

    #[test]
    fn test_validate_touching_vertex() {
        // Figure eight pinched at a shared beacon
        let ring = normalize(&pts(&[
            (0.0, 0.0),
            (5.0, 5.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.0, 5.0),
            (0.0, 10.0),
        ]))
        .unwrap();
        assert!(!ring.validate());
    }

    #[test]
    fn test_validate_utm_sized_coordinates() {
        let ring = normalize(&pts(&[
            (500_000.0, 4_649_776.0),
            (500_030.5, 4_649_776.0),
            (500_030.5, 4_649_801.25),
            (500_000.0, 4_649_801.25),
        ]))
        .unwrap();
        assert!(ring.validate());
    }

    #[test]
    fn test_validate_allows_repeated_beacon() {
        let ring = normalize(&pts(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ]))
        .unwrap();
        assert!(ring.validate());
    }

    #[test]
    fn test_bounds() {
        let ring = normalize(&pts(&[(1.0, 2.0), (4.0, 2.0), (4.0, 8.0)])).unwrap();
        let b = ring.bounds();
        assert_eq!(b.width(), 3.0);
        assert_eq!(b.height(), 6.0);
    }
}
