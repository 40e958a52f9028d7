pub mod area;
pub mod boundary;
pub mod projection;
pub mod scaling;
pub mod traverse;
pub mod view;

pub use area::{area, centroid, perimeter, signed_area};
pub use boundary::{Boundary, normalize};
pub use projection::{Hemisphere, Projector};
pub use scaling::{Bounds, Frame, Scaler};
pub use traverse::{bearing, distance, traverse};
pub use view::MapView;
