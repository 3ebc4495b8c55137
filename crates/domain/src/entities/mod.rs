//! Domain entities - Objects with identity and lifecycle

mod point;
mod route_result;
mod selection_state;

pub use point::{CURRENT_LOCATION_LABEL, Point};
pub use route_result::RouteResult;
pub use selection_state::SelectionState;
