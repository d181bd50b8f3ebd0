//! Map-mode projection: a marker per visible vehicle.

use serde::Serialize;

use crate::vehicle::{GeoPosition, Vehicle, VehicleId, VehicleStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: VehicleId,
    pub position: GeoPosition,
    pub status: VehicleStatus,
    /// Drawn highlighted; at most one marker has this set.
    pub focused: bool,
}

pub fn build_markers(visible: &[&Vehicle], focus: Option<&VehicleId>) -> Vec<MapMarker> {
    visible
        .iter()
        .map(|v| MapMarker {
            id: v.id.clone(),
            position: v.position,
            status: v.status.clone(),
            focused: focus == Some(&v.id),
        })
        .collect()
}
