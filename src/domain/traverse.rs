use serde::{Deserialize, Serialize};

use super::Point;

/// How the turning angle at the first beacon is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// First beacon has no angle (no previous edge)
    #[default]
    Open,
    /// The closing edge is treated as the predecessor of the first edge
    Cyclic,
}

/// One row of a traverse sheet, describing the edge leaving `start`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraverseRecord {
    /// 0-based index of the start beacon
    pub index: usize,
    pub start: Point,
    /// Edge length in input units
    pub distance: f64,
    /// Whole-circle bearing in degrees, clockwise from grid north
    pub bearing: f64,
    /// Turning angle at `start` relative to the previous edge, degrees in [0, 360)
    pub angle: Option<f64>,
}

impl TraverseRecord {
    /// Beacon label as printed on plans (P1, P2, ...)
    pub fn label(&self) -> String {
        format!("P{}", self.index + 1)
    }
}
