use thiserror::Error;

/// Result alias used throughout the geometry engine.
pub type ParcelResult<T> = Result<T, ParcelError>;

/// Why a boundary was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryDefect {
    /// Fewer than three distinct beacons after closing the ring
    TooFewPoints { distinct: usize },
    /// A coordinate is NaN or infinite
    NonFinite { index: usize },
    /// Two edges cross or overlap (edge indices, 0-based)
    SelfIntersecting { first: usize, second: usize },
    /// The ring encloses no area (collinear or doubled-back beacons)
    ZeroArea,
}

impl std::fmt::Display for BoundaryDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryDefect::TooFewPoints { distinct } => {
                write!(f, "need at least 3 distinct points, got {}", distinct)
            }
            BoundaryDefect::NonFinite { index } => {
                write!(f, "point {} has a non-finite coordinate", index + 1)
            }
            BoundaryDefect::SelfIntersecting { first, second } => write!(
                f,
                "edge P{}-P{} crosses edge P{}-P{}",
                first + 1,
                first + 2,
                second + 1,
                second + 2
            ),
            BoundaryDefect::ZeroArea => write!(f, "boundary encloses zero area"),
        }
    }
}

/// Errors surfaced to the caller. Every variant aborts the request.
#[derive(Debug, Error)]
pub enum ParcelError {
    #[error("invalid boundary: {0}")]
    InvalidBoundary(BoundaryDefect),

    #[error("malformed input on line {line}: {detail}")]
    MalformedInput { line: usize, detail: String },
}

impl ParcelError {
    pub fn malformed(line: usize, detail: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            detail: detail.into(),
        }
    }

    /// The boundary defect, if this is a boundary error
    pub fn defect(&self) -> Option<BoundaryDefect> {
        match self {
            ParcelError::InvalidBoundary(d) => Some(*d),
            ParcelError::MalformedInput { .. } => None,
        }
    }
}

impl From<BoundaryDefect> for ParcelError {
    fn from(defect: BoundaryDefect) -> Self {
        ParcelError::InvalidBoundary(defect)
    }
}
