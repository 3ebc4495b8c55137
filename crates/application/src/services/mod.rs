//! Application services - Use case implementations

mod planning_session;
mod point_selection;
mod route_planner;
mod route_session;

pub use planning_session::{DEFAULT_EVENT_BUFFER, PlanningSession, SessionHandle};
pub use point_selection::{
    LabelLookup, PointSelectionController, SelectionChange, SelectionEvent, Transition,
};
pub use route_planner::{
    CommandExecutor, Completion, PlannerCommand, PlannerEvent, PlannerSnapshot, RoutePlanner,
};
pub use route_session::{RouteRequest, RouteSession, RouteStatus};
