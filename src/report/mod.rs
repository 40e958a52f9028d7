//! Parcel reports
//!
//! [`ParcelReport::build`] runs the whole engine once (close, check, measure)
//! and hands back plain values for the renderers in this module.

pub mod geojson;
pub mod sketch;
pub mod table;

use serde::Serialize;
use tracing::debug;

use crate::domain::{AngleMode, Point, TraverseRecord};
use crate::error::ParcelResult;
use crate::geometry::area::{area_unchecked, centroid_unchecked, perimeter_unchecked, shoelace};
use crate::geometry::traverse::traverse_unchecked;
use crate::geometry::{Boundary, MapView, Projector, normalize};

pub use geojson::to_geojson;
pub use sketch::{PageSpec, SketchLayout, render_svg, write_svg};
pub use table::{format_dms, format_table, format_thousands};

/// Options for a single survey computation
#[derive(Debug, Clone, Default)]
pub struct SurveyOptions {
    pub angle_mode: AngleMode,
    /// Reproject beacons for display when set
    pub projector: Option<Projector>,
}

/// Traversal direction of the beacons as entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Reprojected ring and the map camera that frames it
#[derive(Debug, Clone, Serialize)]
pub struct GeographicView {
    pub epsg: u32,
    /// (longitude, latitude) per ring vertex, closing vertex included
    pub ring: Vec<(f64, f64)>,
    pub view: MapView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParcelReport {
    #[serde(skip)]
    pub boundary: Boundary,
    pub area: f64,
    pub perimeter: f64,
    pub centroid: Point,
    pub winding: Winding,
    pub angle_mode: AngleMode,
    pub records: Vec<TraverseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic: Option<GeographicView>,
}

impl ParcelReport {
    /// Normalize and check the beacons, then compute everything a report needs.
    ///
    /// Fails before producing any output if the ring is invalid.
    pub fn build(points: &[Point], options: &SurveyOptions) -> ParcelResult<Self> {
        let boundary = normalize(points)?;
        boundary.check()?;

        let signed = shoelace(boundary.points());
        let records = traverse_unchecked(&boundary, options.angle_mode);
        let centroid = centroid_unchecked(&boundary)?;

        let geographic = options.projector.as_ref().and_then(|proj| {
            let ring = proj.project_points(boundary.points());
            MapView::fit(&ring).map(|view| GeographicView {
                epsg: proj.epsg(),
                ring,
                view,
            })
        });

        let report = Self {
            area: area_unchecked(&boundary),
            perimeter: perimeter_unchecked(&boundary),
            centroid,
            winding: if signed > 0.0 {
                Winding::CounterClockwise
            } else {
                Winding::Clockwise
            },
            angle_mode: options.angle_mode,
            records,
            geographic,
            boundary,
        };

        debug!(
            edges = report.records.len(),
            area = report.area,
            perimeter = report.perimeter,
            "parcel computed"
        );

        Ok(report)
    }

    pub fn edge_count(&self) -> usize {
        self.records.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoundaryDefect;
    use crate::geometry::Hemisphere;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_build_square_report() {
        let report = ParcelReport::build(
            &pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            &SurveyOptions::default(),
        )
        .unwrap();

        assert_eq!(report.area, 100.0);
        assert_eq!(report.perimeter, 40.0);
        assert_eq!(report.edge_count(), 4);
        assert_eq!(report.winding, Winding::Clockwise);
        assert!(report.geographic.is_none());
    }

    #[test]
    fn test_build_rejects_before_output() {
        let err = ParcelReport::build(
            &pts(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]),
            &SurveyOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.defect(),
            Some(BoundaryDefect::SelfIntersecting { .. })
        ));

        let err = ParcelReport::build(&pts(&[(0.0, 0.0), (1.0, 1.0)]), &SurveyOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.defect(),
            Some(BoundaryDefect::TooFewPoints { .. })
        ));
    }

    #[test]
    fn test_build_with_projection() {
        let options = SurveyOptions {
            angle_mode: AngleMode::Cyclic,
            projector: Projector::utm(32, Hemisphere::North),
        };
        let report = ParcelReport::build(
            &pts(&[
                (500_000.0, 4_649_776.0),
                (500_030.0, 4_649_776.0),
                (500_030.0, 4_649_806.0),
                (500_000.0, 4_649_806.0),
            ]),
            &options,
        )
        .unwrap();

        let geo = report.geographic.as_ref().unwrap();
        assert_eq!(geo.epsg, 32632);
        assert_eq!(geo.ring.len(), 5);
        assert!((geo.view.longitude - 9.0).abs() < 0.01);
        assert!((geo.view.latitude - 42.0).abs() < 0.1);
        assert_eq!(geo.view.zoom, 17.0);
        assert_eq!(report.winding, Winding::CounterClockwise);
        assert!(report.records[0].angle.is_some());
    }

    #[test]
    fn test_report_json() {
        let report = ParcelReport::build(
            &pts(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]),
            &SurveyOptions::default(),
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["area"], 6.0);
        assert_eq!(json["angle_mode"], "open");
        assert_eq!(json["winding"], "counter_clockwise");
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
        assert!(json["records"][0]["angle"].is_null());
        assert!(json.get("geographic").is_none());
    }
}
