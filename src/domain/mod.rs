pub mod point;
pub mod traverse;

pub use point::Point;
pub use traverse::{AngleMode, TraverseRecord};
