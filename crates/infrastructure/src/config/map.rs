//! Initial map view configuration

use domain::{
    DomainError,
    value_objects::{Coordinate, Viewport},
};
use serde::{Deserialize, Serialize};

/// Where the map starts before any point or location fix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude of the initial center
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// Longitude of the initial center
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

const fn default_center_latitude() -> f64 {
    40.7128
}

const fn default_center_longitude() -> f64 {
    -74.006
}

const fn default_zoom() -> u8 {
    Viewport::POINT_ZOOM
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    /// The configured initial viewport
    ///
    /// # Errors
    ///
    /// Returns an error if the center is not a valid coordinate.
    pub fn viewport(&self) -> Result<Viewport, DomainError> {
        let center = Coordinate::new(self.center_latitude, self.center_longitude)?;
        Ok(Viewport::new(center, self.zoom))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.viewport().map_err(|e| e.to_string())?;
        if self.zoom > 22 {
            return Err("zoom must be between 0 and 22".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new_york() {
        let viewport = MapConfig::default().viewport().unwrap();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_invalid_center_rejected() {
        let config = MapConfig {
            center_latitude: 123.0,
            ..Default::default()
        };
        assert!(config.viewport().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zoom_out_of_range_rejected() {
        let config = MapConfig {
            zoom: 30,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
