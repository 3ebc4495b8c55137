//! Selected point entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, PointRole, RequestEpoch};

/// Label given to a point taken from the device's geolocation
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// A start or destination point chosen by the user
///
/// The point's identity is its role plus the epoch it was placed in; a
/// later placement in the same role is a different point even at the same
/// coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    role: PointRole,
    coordinate: Coordinate,
    /// Place name, "Current Location", or empty while unresolved
    label: String,
    placed_at: RequestEpoch,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub fn new(
        role: PointRole,
        coordinate: Coordinate,
        label: impl Into<String>,
        placed_at: RequestEpoch,
    ) -> Self {
        Self {
            role,
            coordinate,
            label: label.into(),
            placed_at,
        }
    }

    /// Role of this point
    #[must_use]
    pub const fn role(&self) -> PointRole {
        self.role
    }

    /// Coordinate of this point
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Label as resolved so far (may be empty)
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Epoch in which this point was placed
    #[must_use]
    pub const fn placed_at(&self) -> RequestEpoch {
        self.placed_at
    }

    /// Label for display, falling back to the raw coordinates
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            self.coordinate.to_label()
        } else {
            self.label.clone()
        }
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord() -> Coordinate {
        Coordinate::new_unchecked(40.0, -73.0)
    }

    #[test]
    fn new_point_keeps_fields() {
        let point = Point::new(PointRole::A, coord(), "Park Ave", RequestEpoch::from_raw(1));
        assert_eq!(point.role(), PointRole::A);
        assert_eq!(point.coordinate(), coord());
        assert_eq!(point.label(), "Park Ave");
        assert_eq!(point.placed_at(), RequestEpoch::from_raw(1));
    }

    #[test]
    fn display_label_falls_back_to_coordinates() {
        let point = Point::new(PointRole::B, coord(), "", RequestEpoch::INITIAL);
        assert_eq!(point.display_label(), "40.00000, -73.00000");
    }

    #[test]
    fn display_label_prefers_name() {
        let point = Point::new(PointRole::A, coord(), CURRENT_LOCATION_LABEL, RequestEpoch::INITIAL);
        assert_eq!(point.display_label(), "Current Location");
    }
}
