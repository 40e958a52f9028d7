use super::boundary::Boundary;
use crate::domain::{AngleMode, Point, TraverseRecord};
use crate::error::ParcelResult;

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Planar distance between two beacons
pub fn distance(from: Point, to: Point) -> f64 {
    (to.easting - from.easting).hypot(to.northing - from.northing)
}

/// Whole-circle bearing from `from` to `to`, degrees clockwise from grid north.
///
/// atan2 takes (Δeasting, Δnorthing) rather than the usual (y, x) so that
/// zero points north and angles grow clockwise.
pub fn bearing(from: Point, to: Point) -> f64 {
    let de = to.easting - from.easting;
    let dn = to.northing - from.northing;
    normalize_degrees(de.atan2(dn).to_degrees())
}

/// Compute one traverse row per edge of a valid ring
pub fn traverse(boundary: &Boundary, mode: AngleMode) -> ParcelResult<Vec<TraverseRecord>> {
    boundary.check()?;
    Ok(traverse_unchecked(boundary, mode))
}

pub(crate) fn traverse_unchecked(boundary: &Boundary, mode: AngleMode) -> Vec<TraverseRecord> {
    let bearings: Vec<f64> = boundary.edges().map(|(a, b)| bearing(a, b)).collect();
    let closing = bearings.last().copied();

    boundary
        .edges()
        .enumerate()
        .map(|(i, (start, end))| {
            let previous = match (i, mode) {
                (0, AngleMode::Open) => None,
                (0, AngleMode::Cyclic) => closing,
                _ => Some(bearings[i - 1]),
            };

            TraverseRecord {
                index: i,
                start,
                distance: distance(start, end),
                bearing: bearings[i],
                angle: previous.map(|prev| normalize_degrees(bearings[i] - prev)),
            }
        })
        .collect()
}
