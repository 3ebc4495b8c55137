//! Routing service port
//!
//! Defines the interface for driving-route computation between two points.

use async_trait::async_trait;
use domain::{RouteResult, value_objects::Coordinate};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a single route from `start` to `end`
    ///
    /// Fails with `RouteNotFound` when the service has no route and
    /// `RouteNetwork` when the service cannot be used. Never returns a
    /// partial result.
    async fn compute_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteResult, ApplicationError>;
}
