//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod line_string;

pub use geo_point::GeoPoint;
pub use line_string::{GeometryType, LineString, Position};
