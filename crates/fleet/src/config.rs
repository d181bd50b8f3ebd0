use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FleetError;
use crate::list_view::ListSort;
use crate::vehicle::GeoPosition;

pub const DEFAULT_MAP_CENTER: GeoPosition = GeoPosition::new(48.8566, 2.3522);
pub const DEFAULT_ZOOM: f32 = 12.0;
pub const FLY_TO_ZOOM: f32 = 15.0;
pub const MIN_ZOOM: f32 = 3.0;
pub const MAX_ZOOM: f32 = 19.0;

/// Capacity of the command result ring buffer.
pub const COMMAND_LOG_CAPACITY: usize = 64;

/// Tunable presentation settings. Every field has a default, so a settings
/// file only needs to name what it overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Where the map camera starts.
    pub initial_center: GeoPosition,
    pub initial_zoom: f32,
    /// Minimum zoom applied when the camera flies to a vehicle.
    pub fly_to_zoom: f32,
    /// Keep the camera on the focused vehicle as the feed moves it.
    pub follow_focused: bool,
    pub sidebar_open: bool,
    pub list_sort: ListSort,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            initial_center: DEFAULT_MAP_CENTER,
            initial_zoom: DEFAULT_ZOOM,
            fly_to_zoom: FLY_TO_ZOOM,
            follow_focused: true,
            sidebar_open: true,
            list_sort: ListSort::default(),
        }
    }
}

impl ViewSettings {
    pub fn from_json(json: &str) -> Result<Self, FleetError> {
        let mut settings: ViewSettings = serde_json::from_str(json)?;
        settings.initial_zoom = settings.initial_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        settings.fly_to_zoom = settings.fly_to_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, FleetError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_view::ListSortKey;

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings = ViewSettings::from_json("{}").unwrap();
        assert_eq!(settings, ViewSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            ViewSettings::from_json(r#"{"follow_focused":false,"list_sort":{"key":"name","descending":true}}"#)
                .unwrap();
        assert!(!settings.follow_focused);
        assert_eq!(settings.list_sort.key, ListSortKey::Name);
        assert!(settings.list_sort.descending);
        assert_eq!(settings.fly_to_zoom, FLY_TO_ZOOM);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let settings = ViewSettings::from_json(r#"{"fly_to_zoom":40.0,"initial_zoom":0.5}"#).unwrap();
        assert_eq!(settings.fly_to_zoom, MAX_ZOOM);
        assert_eq!(settings.initial_zoom, MIN_ZOOM);
    }

    #[test]
    fn test_malformed_document_is_decode_error() {
        let err = ViewSettings::from_json("[1,2").unwrap_err();
        assert!(matches!(err, FleetError::Decode(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ViewSettings::load(Path::new("/nonexistent/fleet-settings.json")).unwrap_err();
        assert!(matches!(err, FleetError::Io(_)));
    }
}
