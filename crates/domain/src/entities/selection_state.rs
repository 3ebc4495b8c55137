//! Point selection aggregate
//!
//! Holds at most one start point (A) and one destination (B). The
//! destination can only exist while a start point exists; replacing the
//! start point always drops the destination.

use serde::Serialize;

use super::Point;
use crate::errors::DomainError;
use crate::value_objects::{Coordinate, PointRole, RequestEpoch};

/// The current start/destination pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    point_a: Option<Point>,
    point_b: Option<Point>,
}

impl SelectionState {
    /// Create an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            point_a: None,
            point_b: None,
        }
    }

    /// The start point, if set
    #[must_use]
    pub const fn point_a(&self) -> Option<&Point> {
        self.point_a.as_ref()
    }

    /// The destination, if set
    #[must_use]
    pub const fn point_b(&self) -> Option<&Point> {
        self.point_b.as_ref()
    }

    /// The point for a role, if set
    #[must_use]
    pub const fn point(&self, role: PointRole) -> Option<&Point> {
        match role {
            PointRole::A => self.point_a(),
            PointRole::B => self.point_b(),
        }
    }

    /// Whether no point is selected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.point_a.is_none() && self.point_b.is_none()
    }

    /// Whether both points are selected
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.point_a.is_some() && self.point_b.is_some()
    }

    /// Both points, when the pair is complete
    #[must_use]
    pub fn pair(&self) -> Option<(&Point, &Point)> {
        self.point_a.as_ref().zip(self.point_b.as_ref())
    }

    /// The most recently meaningful point: the destination if set, else the start
    #[must_use]
    pub fn latest_point(&self) -> Option<&Point> {
        self.point_b.as_ref().or(self.point_a.as_ref())
    }

    /// Set the start point, dropping any destination
    pub fn set_start(&mut self, coordinate: Coordinate, label: impl Into<String>, epoch: RequestEpoch) {
        self.point_a = Some(Point::new(PointRole::A, coordinate, label, epoch));
        self.point_b = None;
    }

    /// Set the destination
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingStartPoint` and leaves the selection
    /// untouched when no start point is set.
    pub fn set_destination(
        &mut self,
        coordinate: Coordinate,
        label: impl Into<String>,
        epoch: RequestEpoch,
    ) -> Result<(), DomainError> {
        if self.point_a.is_none() {
            return Err(DomainError::MissingStartPoint(PointRole::B.to_string()));
        }
        self.point_b = Some(Point::new(PointRole::B, coordinate, label, epoch));
        Ok(())
    }

    /// Remove both points
    pub fn clear(&mut self) {
        self.point_a = None;
        self.point_b = None;
    }

    /// Fill in the label of the point placed in `placed_at`
    ///
    /// Returns `false` when that point no longer exists (it was replaced or
    /// cleared), in which case nothing changes.
    pub fn resolve_label(&mut self, role: PointRole, placed_at: RequestEpoch, label: String) -> bool {
        let slot = match role {
            PointRole::A => &mut self.point_a,
            PointRole::B => &mut self.point_b,
        };
        match slot {
            Some(point) if point.placed_at() == placed_at => {
                point.set_label(label);
                true
            },
            _ => false,
        }
    }

    /// Hint shown to the user for the next interaction
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match (&self.point_a, &self.point_b) {
            (None, _) => "Click on the map or search to set Point A",
            (Some(_), None) => "Click on the map or search to set Point B",
            (Some(_), Some(_)) => "Click anywhere to reset",
        }
    }
}
