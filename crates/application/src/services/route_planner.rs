//! Route planner
//!
//! Couples a [`PointSelectionController`] with a [`RouteSession`] and the
//! geocoding and routing ports. Handling an event is synchronous and yields
//! [`PlannerCommand`]s; running a command performs the I/O and yields a
//! [`Completion`], which is fed back through [`RoutePlanner::complete`].
//! Keeping the two halves apart lets an event loop run I/O concurrently while
//! every state change still happens one at a time.

use std::{fmt, sync::Arc};

use domain::{
    RouteResult, SelectionState,
    value_objects::{Coordinate, PointRole, RequestEpoch, Viewport},
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{GeocodeMatch, GeocodingPort, RoutingPort},
    services::{
        point_selection::{LabelLookup, PointSelectionController, SelectionChange, SelectionEvent},
        route_session::{RouteRequest, RouteSession, RouteStatus},
    },
};

/// User input accepted by the planner
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerEvent {
    /// A direct selection event
    Selection(SelectionEvent),
    /// Free-text search from one of the search boxes
    Search {
        /// Which point the search box sets
        role: PointRole,
        /// Query text
        query: String,
    },
    /// The "use current location" button, using the last location fix
    UseStoredLocation,
}

impl From<SelectionEvent> for PlannerEvent {
    fn from(event: SelectionEvent) -> Self {
        Self::Selection(event)
    }
}

/// I/O the planner wants performed
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerCommand {
    /// Name a clicked point
    ReverseGeocode(LabelLookup),
    /// Resolve a search box query
    ForwardGeocode {
        /// Which point the search box sets
        role: PointRole,
        /// Query text
        query: String,
        /// Epoch the search was issued in
        epoch: RequestEpoch,
    },
    /// Route the current pair
    ComputeRoute(RouteRequest),
}

/// Outcome of a [`PlannerCommand`]
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Reverse geocode finished
    Label {
        /// The lookup that was run
        lookup: LabelLookup,
        /// Resolved name, if any
        label: Option<String>,
    },
    /// Forward geocode finished
    Search {
        /// Which point the search box sets
        role: PointRole,
        /// Query text
        query: String,
        /// Epoch the search was issued in
        epoch: RequestEpoch,
        /// First match or the failure
        outcome: Result<GeocodeMatch, ApplicationError>,
    },
    /// Route computation finished
    Route {
        /// The request that was run
        request: RouteRequest,
        /// Route or the failure
        outcome: Result<RouteResult, ApplicationError>,
    },
}

/// Runs planner commands against the ports
#[derive(Clone)]
pub struct CommandExecutor {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
}

impl fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor").finish_non_exhaustive()
    }
}

impl CommandExecutor {
    /// Create an executor
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self { geocoder, router }
    }

    /// Perform one command
    #[instrument(skip(self))]
    pub async fn run(self, command: PlannerCommand) -> Completion {
        match command {
            PlannerCommand::ReverseGeocode(lookup) => {
                let label = self.geocoder.reverse_geocode(lookup.coordinate).await;
                Completion::Label { lookup, label }
            },
            PlannerCommand::ForwardGeocode { role, query, epoch } => {
                let outcome = self.geocoder.forward_geocode(&query).await;
                Completion::Search {
                    role,
                    query,
                    epoch,
                    outcome,
                }
            },
            PlannerCommand::ComputeRoute(request) => {
                let outcome = self.router.compute_route(request.start, request.end).await;
                Completion::Route { request, outcome }
            },
        }
    }
}

/// What the map-rendering surface shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerSnapshot {
    /// Current selection
    pub selection: SelectionState,
    /// Epoch of the selection
    pub epoch: RequestEpoch,
    /// Map viewport
    pub viewport: Viewport,
    /// Hint for the next interaction
    pub instruction: String,
    /// Whether a route is being calculated
    pub loading: bool,
    /// Live route, if any
    pub route: Option<RouteResult>,
    /// Formatted distance, e.g. `"5.00 km"`
    pub distance: Option<String>,
    /// Formatted duration, e.g. `"10 min"`
    pub duration: Option<String>,
    /// Routing error for the status area
    pub error: Option<String>,
    /// Blocking message from the last rejected input
    pub notice: Option<String>,
}

/// Controller/session pairing for one planning session
pub struct RoutePlanner {
    executor: CommandExecutor,
    controller: PointSelectionController,
    session: RouteSession,
    notice: Option<String>,
}

impl fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("controller", &self.controller)
            .field("session", &self.session)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a planner with the default viewport
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self::with_viewport(geocoder, router, Viewport::default())
    }

    /// Create a planner starting at a given viewport
    pub fn with_viewport(
        geocoder: Arc<dyn GeocodingPort>,
        router: Arc<dyn RoutingPort>,
        viewport: Viewport,
    ) -> Self {
        Self {
            executor: CommandExecutor::new(geocoder, router),
            controller: PointSelectionController::new(viewport),
            session: RouteSession::new(),
            notice: None,
        }
    }

    /// Executor for this planner's commands
    #[must_use]
    pub fn executor(&self) -> CommandExecutor {
        self.executor.clone()
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        self.controller.state()
    }

    /// Current route status
    #[must_use]
    pub const fn status(&self) -> &RouteStatus {
        self.session.status()
    }

    /// Current epoch
    #[must_use]
    pub const fn epoch(&self) -> RequestEpoch {
        self.controller.epoch()
    }

    /// Blocking message from the last rejected input
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Handle user input
    ///
    /// Blocking errors (precondition) are returned and also kept as the
    /// snapshot notice; the selection is not changed.
    pub fn handle(&mut self, event: PlannerEvent) -> Result<Vec<PlannerCommand>, ApplicationError> {
        match event {
            PlannerEvent::Selection(event) => {
                let change = self.controller.apply(event).inspect_err(|e| self.reject(e))?;
                Ok(change.map(|c| self.after_change(&c)).unwrap_or_default())
            },
            PlannerEvent::Search { role, query } => {
                self.notice = None;
                Ok(vec![PlannerCommand::ForwardGeocode {
                    role,
                    query,
                    epoch: self.controller.epoch(),
                }])
            },
            PlannerEvent::UseStoredLocation => {
                let location = self.controller.current_location();
                Ok(self
                    .controller
                    .use_current_location(location)
                    .map(|c| self.after_change(&c))
                    .unwrap_or_default())
            },
        }
    }

    /// Apply the outcome of a command
    ///
    /// Superseded completions return `StaleResponseDiscarded`; a search is
    /// superseded once the selection changed after it was issued. Failed
    /// searches return their blocking error; routing failures are recorded
    /// in the route status and are not returned.
    pub fn complete(
        &mut self,
        completion: Completion,
    ) -> Result<Vec<PlannerCommand>, ApplicationError> {
        match completion {
            Completion::Label { lookup, label } => {
                self.controller.apply_label(&lookup, label)?;
                Ok(Vec::new())
            },
            Completion::Search {
                role,
                query,
                epoch,
                outcome,
            } => {
                let current = self.controller.epoch();
                if epoch.is_stale(current) {
                    debug!(%query, issued = %epoch, %current, "discarding stale search result");
                    return Err(ApplicationError::StaleResponseDiscarded {
                        issued: epoch,
                        current,
                    });
                }
                let found = outcome.inspect_err(|e| {
                    warn!(%query, error = %e, "search failed");
                    self.reject(e);
                })?;
                let change = self
                    .controller
                    .on_search_select(role, found.coordinate, found.label)
                    .inspect_err(|e| self.reject(e))?;
                Ok(self.after_change(&change))
            },
            Completion::Route { request, outcome } => {
                self.session.complete(request.epoch, outcome)?;
                Ok(Vec::new())
            },
        }
    }

    /// Handle an event and run every resulting command to completion,
    /// one at a time
    ///
    /// Returns the first blocking error. Stale completions cannot occur
    /// here because nothing else changes the selection meanwhile.
    pub async fn settle(&mut self, event: PlannerEvent) -> Result<(), ApplicationError> {
        let mut queue = self.handle(event)?;
        while let Some(command) = queue.pop() {
            let completion = self.executor().run(command).await;
            match self.complete(completion) {
                Ok(more) => queue.extend(more),
                Err(e) if e.is_stale() => debug!(error = %e, "ignored stale completion"),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// State for the map-rendering surface
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        let route = self.session.result().copied();
        PlannerSnapshot {
            selection: self.controller.state().clone(),
            epoch: self.controller.epoch(),
            viewport: self.controller.viewport(),
            instruction: self.controller.state().instruction().to_string(),
            loading: self.session.is_pending(),
            route,
            distance: route.as_ref().map(RouteResult::format_distance),
            duration: route.as_ref().map(RouteResult::format_duration),
            error: self.session.error().map(ApplicationError::user_message),
            notice: self.notice.clone(),
        }
    }

    /// Convenience for callers holding raw coordinates
    pub fn click(&mut self, coordinate: Coordinate) -> Vec<PlannerCommand> {
        let change = self.controller.on_map_click(coordinate);
        self.after_change(&change)
    }

    fn after_change(&mut self, change: &SelectionChange) -> Vec<PlannerCommand> {
        self.notice = None;
        let mut commands: Vec<PlannerCommand> = change
            .lookup
            .map(PlannerCommand::ReverseGeocode)
            .into_iter()
            .collect();

        match self.controller.state().pair() {
            Some((start, end)) => {
                let request = RouteRequest {
                    start: start.coordinate(),
                    end: end.coordinate(),
                    epoch: change.epoch,
                };
                self.session.begin(&request);
                commands.push(PlannerCommand::ComputeRoute(request));
            },
            None => self.session.reset(change.epoch),
        }
        commands
    }

    fn reject(&mut self, error: &ApplicationError) {
        if error.is_blocking() || matches!(error, ApplicationError::Domain(_)) {
            self.notice = Some(error.user_message());
        }
    }
}
