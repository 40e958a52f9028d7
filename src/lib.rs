//! parcelplot - Parcel area and traverse computation from UTM beacon coordinates

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod input;
pub mod report;

pub use domain::{AngleMode, Point, TraverseRecord};
pub use error::{BoundaryDefect, ParcelError, ParcelResult};
pub use geometry::{
    Boundary, Hemisphere, MapView, Projector, area, centroid, normalize, perimeter, signed_area,
    traverse,
};
pub use report::{ParcelReport, SurveyOptions};
