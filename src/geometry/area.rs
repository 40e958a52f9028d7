use geo::{Centroid, LineString, Polygon};

use super::boundary::Boundary;
use super::traverse::distance;
use crate::domain::Point;
use crate::error::{BoundaryDefect, ParcelResult};

/// Signed shoelace sum over a closed ring, halved.
///
/// Positive for counter-clockwise rings. Products are taken relative to the
/// first vertex so UTM-sized coordinates don't swamp the result.
pub(crate) fn shoelace(ring: &[Point]) -> f64 {
    let Some(origin) = ring.first() else {
        return 0.0;
    };

    let twice: f64 = ring
        .windows(2)
        .map(|w| {
            let (x0, y0) = (w[0].easting - origin.easting, w[0].northing - origin.northing);
            let (x1, y1) = (w[1].easting - origin.easting, w[1].northing - origin.northing);
            x0 * y1 - x1 * y0
        })
        .sum();

    0.5 * twice
}

/// Signed planar area: positive when the beacons run counter-clockwise
pub fn signed_area(boundary: &Boundary) -> ParcelResult<f64> {
    boundary.check()?;
    Ok(shoelace(boundary.points()))
}

/// Enclosed area in square input units, independent of traversal direction
pub fn area(boundary: &Boundary) -> ParcelResult<f64> {
    boundary.check()?;
    Ok(area_unchecked(boundary))
}

/// Total boundary length
pub fn perimeter(boundary: &Boundary) -> ParcelResult<f64> {
    boundary.check()?;
    Ok(perimeter_unchecked(boundary))
}

/// Area-weighted centroid, used for centring map displays
pub fn centroid(boundary: &Boundary) -> ParcelResult<Point> {
    boundary.check()?;
    centroid_unchecked(boundary)
}

pub(crate) fn area_unchecked(boundary: &Boundary) -> f64 {
    shoelace(boundary.points()).abs()
}

pub(crate) fn perimeter_unchecked(boundary: &Boundary) -> f64 {
    boundary.edges().map(|(a, b)| distance(a, b)).sum()
}

pub(crate) fn centroid_unchecked(boundary: &Boundary) -> ParcelResult<Point> {
    let exterior: LineString<f64> = boundary.points().iter().map(|&p| geo::Coord::from(p)).collect();
    let polygon = Polygon::new(exterior, vec![]);

    polygon
        .centroid()
        .map(|c| Point::new(c.x(), c.y()))
        .ok_or_else(|| BoundaryDefect::ZeroArea.into())
}
