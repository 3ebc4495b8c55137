//! Route session
//!
//! Lifecycle of the route request for the current point pair:
//! `Idle → Pending → Resolved | Failed`. Completions are accepted only while
//! pending and only for the epoch the session is waiting on; anything else
//! belongs to a superseded pair and is discarded.

use domain::{
    RouteResult,
    value_objects::{Coordinate, RequestEpoch},
};
use tracing::{debug, info, warn};

use crate::error::ApplicationError;

/// A route request for one point pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    /// Start coordinate
    pub start: Coordinate,
    /// Destination coordinate
    pub end: Coordinate,
    /// Epoch of the point pair
    pub epoch: RequestEpoch,
}

/// State of the route session
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteStatus {
    /// Fewer than two points
    #[default]
    Idle,
    /// Waiting for the routing service
    Pending {
        /// Epoch of the outstanding request
        epoch: RequestEpoch,
    },
    /// Route available
    Resolved {
        /// Epoch of the pair the route belongs to
        epoch: RequestEpoch,
        /// Distance and duration
        result: RouteResult,
    },
    /// Routing failed
    Failed {
        /// Epoch of the pair the failure belongs to
        epoch: RequestEpoch,
        /// Routing error
        error: ApplicationError,
    },
}

/// Owner of the in-flight route request and its outcome
#[derive(Debug, Clone, Default)]
pub struct RouteSession {
    status: RouteStatus,
    epoch: RequestEpoch,
}

impl RouteSession {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> &RouteStatus {
        &self.status
    }

    /// Epoch of the selection the session last saw
    #[must_use]
    pub const fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    /// Whether a route request is outstanding
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RouteStatus::Pending { .. })
    }

    /// The live route, if resolved
    #[must_use]
    pub const fn result(&self) -> Option<&RouteResult> {
        match &self.status {
            RouteStatus::Resolved { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The routing error, if failed
    #[must_use]
    pub const fn error(&self) -> Option<&ApplicationError> {
        match &self.status {
            RouteStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Drop any pending or finished route; the selection is incomplete
    pub fn reset(&mut self, epoch: RequestEpoch) {
        if self.status != RouteStatus::Idle {
            debug!(%epoch, "route session reset");
        }
        self.epoch = epoch;
        self.status = RouteStatus::Idle;
    }

    /// Wait for the route of a new complete pair
    pub fn begin(&mut self, request: &RouteRequest) {
        info!(epoch = %request.epoch, "route requested");
        self.epoch = request.epoch;
        self.status = RouteStatus::Pending {
            epoch: request.epoch,
        };
    }

    /// Accept the outcome of a route request issued in `issued`
    ///
    /// A routing error for the live request is recorded as `Failed` and is
    /// not returned. A completion for any other epoch, or one arriving when
    /// nothing is pending, returns `StaleResponseDiscarded` and changes
    /// nothing.
    pub fn complete(
        &mut self,
        issued: RequestEpoch,
        outcome: Result<RouteResult, ApplicationError>,
    ) -> Result<(), ApplicationError> {
        let live = matches!(self.status, RouteStatus::Pending { epoch } if epoch == issued);
        if !live {
            debug!(%issued, current = %self.epoch, "discarding stale route response");
            return Err(ApplicationError::StaleResponseDiscarded {
                issued,
                current: self.epoch,
            });
        }

        self.status = match outcome {
            Ok(result) => {
                info!(epoch = %issued, %result, "route resolved");
                RouteStatus::Resolved {
                    epoch: issued,
                    result,
                }
            },
            Err(error) => {
                warn!(epoch = %issued, %error, "route failed");
                RouteStatus::Failed {
                    epoch: issued,
                    error,
                }
            },
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(epoch: u64) -> RouteRequest {
        RouteRequest {
            start: Coordinate::new_unchecked(40.0, -73.0),
            end: Coordinate::new_unchecked(40.1, -73.1),
            epoch: RequestEpoch::from_raw(epoch),
        }
    }

    fn route(meters: f64, seconds: f64) -> RouteResult {
        RouteResult::new(meters, seconds).unwrap()
    }

    #[test]
    fn starts_idle() {
        let session = RouteSession::new();
        assert_eq!(session.status(), &RouteStatus::Idle);
        assert!(!session.is_pending());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn live_success_resolves() {
        let mut session = RouteSession::new();
        session.begin(&request(2));
        assert!(session.is_pending());

        session
            .complete(RequestEpoch::from_raw(2), Ok(route(5000.0, 600.0)))
            .unwrap();

        assert_eq!(session.result(), Some(&route(5000.0, 600.0)));
        assert!(!session.is_pending());
    }

    #[test]
    fn live_failure_is_recorded() {
        let mut session = RouteSession::new();
        session.begin(&request(2));

        session
            .complete(
                RequestEpoch::from_raw(2),
                Err(ApplicationError::RouteNotFound("no road".to_string())),
            )
            .unwrap();

        assert!(matches!(
            session.error(),
            Some(ApplicationError::RouteNotFound(_))
        ));
        assert!(session.result().is_none());
    }

    #[test]
    fn stale_success_is_discarded() {
        let mut session = RouteSession::new();
        session.begin(&request(2));
        session.begin(&request(4));

        let result = session.complete(RequestEpoch::from_raw(2), Ok(route(5000.0, 600.0)));

        assert!(matches!(
            result,
            Err(ApplicationError::StaleResponseDiscarded { .. })
        ));
        assert_eq!(
            session.status(),
            &RouteStatus::Pending {
                epoch: RequestEpoch::from_raw(4)
            }
        );
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut session = RouteSession::new();
        session.begin(&request(2));
        session.reset(RequestEpoch::from_raw(3));

        let result = session.complete(
            RequestEpoch::from_raw(2),
            Err(ApplicationError::RouteNetwork("timeout".to_string())),
        );

        assert!(result.is_err());
        assert_eq!(session.status(), &RouteStatus::Idle);
    }

    #[test]
    fn duplicate_completion_is_discarded() {
        let mut session = RouteSession::new();
        session.begin(&request(2));
        session
            .complete(RequestEpoch::from_raw(2), Ok(route(5000.0, 600.0)))
            .unwrap();

        let again = session.complete(RequestEpoch::from_raw(2), Ok(route(1.0, 1.0)));
        assert!(again.is_err());
        assert_eq!(session.result(), Some(&route(5000.0, 600.0)));
    }

    #[test]
    fn reset_drops_result() {
        let mut session = RouteSession::new();
        session.begin(&request(2));
        session
            .complete(RequestEpoch::from_raw(2), Ok(route(5000.0, 600.0)))
            .unwrap();

        session.reset(RequestEpoch::from_raw(3));
        assert!(session.result().is_none());
        assert_eq!(session.epoch(), RequestEpoch::from_raw(3));
    }
}
