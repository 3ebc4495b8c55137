//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod point_role;
mod request_epoch;
mod viewport;

pub use coordinate::Coordinate;
pub use point_role::PointRole;
pub use request_epoch::RequestEpoch;
pub use viewport::Viewport;
