//! Point selection controller
//!
//! The state machine that turns map clicks, search selections, the
//! "use current location" button and "clear" into transitions of the
//! start/destination pair. It performs no I/O: a map click places the point
//! right away with an empty label and hands back a [`LabelLookup`] for the
//! caller to resolve.
//!
//! Every transition advances the [`RequestEpoch`]. Label lookups remember
//! the epoch their point was placed in, so a name that arrives after the
//! point was replaced or cleared is dropped.

use domain::{
    CURRENT_LOCATION_LABEL, SelectionState,
    value_objects::{Coordinate, PointRole, RequestEpoch, Viewport},
};
use tracing::{debug, info};

use crate::error::ApplicationError;

/// Input to the selection state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The user clicked the map
    MapClicked(Coordinate),
    /// A search box resolved its query and the user picked the result
    SearchSelected {
        /// Which point the search box sets
        role: PointRole,
        /// Resolved coordinate
        coordinate: Coordinate,
        /// Resolved place name
        label: String,
    },
    /// The device reported its position
    LocationFix(Coordinate),
    /// The user asked to start from the current location
    UseCurrentLocation(Option<Coordinate>),
    /// The user cleared the route
    Clear,
}

/// Which of the transition rules fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Point A placed on an empty selection
    StartPlaced,
    /// Point B placed after point A
    DestinationPlaced,
    /// Point A replaced, point B dropped
    Restarted,
    /// Both points removed
    Cleared,
}

/// A reverse-geocode the caller should run for a freshly clicked point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLookup {
    /// Role of the point to name
    pub role: PointRole,
    /// Coordinate to name
    pub coordinate: Coordinate,
    /// Epoch the point was placed in
    pub epoch: RequestEpoch,
}

/// Result of a selection transition
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    /// Epoch after the transition
    pub epoch: RequestEpoch,
    /// Rule that fired
    pub transition: Transition,
    /// Label to resolve, for map clicks
    pub lookup: Option<LabelLookup>,
}

/// State machine for start/destination selection
#[derive(Debug, Clone)]
pub struct PointSelectionController {
    state: SelectionState,
    epoch: RequestEpoch,
    viewport: Viewport,
    current_location: Option<Coordinate>,
}

impl Default for PointSelectionController {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl PointSelectionController {
    /// Create a controller with an empty selection
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: SelectionState::new(),
            epoch: RequestEpoch::INITIAL,
            viewport,
            current_location: None,
        }
    }

    /// Current selection
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Current epoch
    #[must_use]
    pub const fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    /// Viewport the map should show
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last reported device position
    #[must_use]
    pub const fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    /// Apply an event
    ///
    /// Returns `Ok(None)` for events that do not touch the selection
    /// (a location fix, or "use current location" without a position).
    pub fn apply(
        &mut self,
        event: SelectionEvent,
    ) -> Result<Option<SelectionChange>, ApplicationError> {
        match event {
            SelectionEvent::MapClicked(coordinate) => Ok(Some(self.on_map_click(coordinate))),
            SelectionEvent::SearchSelected {
                role,
                coordinate,
                label,
            } => self.on_search_select(role, coordinate, label).map(Some),
            SelectionEvent::LocationFix(coordinate) => {
                self.record_location_fix(coordinate);
                Ok(None)
            },
            SelectionEvent::UseCurrentLocation(location) => Ok(self.use_current_location(location)),
            SelectionEvent::Clear => Ok(Some(self.clear())),
        }
    }

    /// Place a point where the map was clicked
    ///
    /// The rule is chosen from the state before the click: empty selection
    /// places A, A alone places B, a complete pair restarts from A.
    pub fn on_map_click(&mut self, coordinate: Coordinate) -> SelectionChange {
        let epoch = self.advance();

        let (role, transition) = match (self.state.point_a(), self.state.point_b()) {
            (None, _) => (PointRole::A, Transition::StartPlaced),
            (Some(_), None) => (PointRole::B, Transition::DestinationPlaced),
            (Some(_), Some(_)) => (PointRole::A, Transition::Restarted),
        };

        match role {
            PointRole::A => self.state.set_start(coordinate, String::new(), epoch),
            PointRole::B => {
                // Point A is present on this branch
                if let Err(err) = self.state.set_destination(coordinate, String::new(), epoch) {
                    debug!(%err, "destination rejected");
                }
            },
        }
        self.focus_latest();

        info!(%epoch, ?transition, %coordinate, "map click");

        SelectionChange {
            epoch,
            transition,
            lookup: Some(LabelLookup {
                role,
                coordinate,
                epoch,
            }),
        }
    }

    /// Assign a point from a resolved search
    ///
    /// Setting A always drops B. Setting B without A is rejected and leaves
    /// the selection and epoch untouched.
    pub fn on_search_select(
        &mut self,
        role: PointRole,
        coordinate: Coordinate,
        label: impl Into<String>,
    ) -> Result<SelectionChange, ApplicationError> {
        let label = label.into();

        let transition = match role {
            PointRole::A => {
                let transition = if self.state.is_empty() {
                    Transition::StartPlaced
                } else {
                    Transition::Restarted
                };
                let epoch = self.advance();
                self.state.set_start(coordinate, label, epoch);
                transition
            },
            PointRole::B => {
                if self.state.point_a().is_none() {
                    return Err(ApplicationError::RoutePrecondition(
                        "start location required".to_string(),
                    ));
                }
                let epoch = self.advance();
                self.state.set_destination(coordinate, label, epoch)?;
                Transition::DestinationPlaced
            },
        };
        self.focus_latest();

        info!(epoch = %self.epoch, ?transition, %role, "search selection");

        Ok(SelectionChange {
            epoch: self.epoch,
            transition,
            lookup: None,
        })
    }

    /// Start from the device position
    ///
    /// Does nothing when no position is known.
    pub fn use_current_location(&mut self, location: Option<Coordinate>) -> Option<SelectionChange> {
        let location = location?;

        let transition = if self.state.is_empty() {
            Transition::StartPlaced
        } else {
            Transition::Restarted
        };
        let epoch = self.advance();
        self.state.set_start(location, CURRENT_LOCATION_LABEL, epoch);
        self.viewport = Viewport::new(location, Viewport::CURRENT_LOCATION_ZOOM);

        info!(%epoch, ?transition, "using current location");

        Some(SelectionChange {
            epoch,
            transition,
            lookup: None,
        })
    }

    /// Remember the device position and center on it
    ///
    /// The selection is not touched.
    pub fn record_location_fix(&mut self, location: Coordinate) {
        debug!(%location, "location fix");
        self.current_location = Some(location);
        self.viewport = Viewport::new(location, Viewport::LOCATION_FIX_ZOOM);
    }

    /// Remove both points
    pub fn clear(&mut self) -> SelectionChange {
        let epoch = self.advance();
        self.state.clear();

        info!(%epoch, "selection cleared");

        SelectionChange {
            epoch,
            transition: Transition::Cleared,
            lookup: None,
        }
    }

    /// Fill in a resolved label
    ///
    /// A `None` label leaves the point with its empty label. When the point
    /// the lookup was issued for is gone, returns
    /// `StaleResponseDiscarded` without changing anything.
    pub fn apply_label(
        &mut self,
        lookup: &LabelLookup,
        label: Option<String>,
    ) -> Result<(), ApplicationError> {
        let placed = self
            .state
            .point(lookup.role)
            .is_some_and(|point| point.placed_at() == lookup.epoch);

        if !placed {
            return Err(ApplicationError::StaleResponseDiscarded {
                issued: lookup.epoch,
                current: self.epoch,
            });
        }

        if let Some(label) = label {
            self.state.resolve_label(lookup.role, lookup.epoch, label);
        }
        Ok(())
    }

    fn advance(&mut self) -> RequestEpoch {
        self.epoch = self.epoch.next();
        self.epoch
    }

    fn focus_latest(&mut self) {
        if let Some(point) = self.state.latest_point() {
            self.viewport = Viewport::focus(point.coordinate());
        }
    }
}
