//! Map viewport value object

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Center and zoom level the map-rendering surface should show
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Map center
    pub center: Coordinate,
    /// Zoom level
    pub zoom: u8,
}

impl Viewport {
    /// Zoom used when flying to a freshly placed point
    pub const POINT_ZOOM: u8 = 15;
    /// Zoom used when the user asks for their current location
    pub const CURRENT_LOCATION_ZOOM: u8 = 14;
    /// Zoom used when a geolocation fix arrives at session start
    pub const LOCATION_FIX_ZOOM: u8 = 13;

    /// Create a viewport
    #[must_use]
    pub const fn new(center: Coordinate, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Viewport focused on a selected point
    #[must_use]
    pub const fn focus(point: Coordinate) -> Self {
        Self::new(point, Self::POINT_ZOOM)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Coordinate::new_york(), Self::POINT_ZOOM)
    }
}
