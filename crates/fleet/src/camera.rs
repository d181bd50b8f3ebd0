//! Map camera state driven by center requests.
//!
//! The engine does not render; `MapCamera` is the position a map widget should
//! show. Center requests move it and raise the zoom to at least the fly-to
//! level. With `follow_focused` on, the camera also tracks the focused
//! vehicle as the feed moves it.

use bevy::prelude::*;
use serde::Serialize;

use crate::config::ViewSettings;
use crate::focus::{CenterOnVehicle, FocusedVehicle};
use crate::store::FleetStore;
use crate::vehicle::GeoPosition;
use crate::FleetSet;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCamera {
    pub center: GeoPosition,
    pub zoom: f32,
}

impl MapCamera {
    pub fn fly_to(&mut self, position: GeoPosition, min_zoom: f32) {
        self.center = position;
        self.zoom = self.zoom.max(min_zoom);
    }
}

impl FromWorld for MapCamera {
    fn from_world(world: &mut World) -> Self {
        let settings = world
            .get_resource::<ViewSettings>()
            .cloned()
            .unwrap_or_default();
        Self {
            center: settings.initial_center,
            zoom: settings.initial_zoom,
        }
    }
}

/// Only the newest request in a frame matters.
fn center_on_requests(
    mut requests: EventReader<CenterOnVehicle>,
    settings: Res<ViewSettings>,
    mut camera: ResMut<MapCamera>,
) {
    if let Some(request) = requests.read().last() {
        camera.fly_to(request.position, settings.fly_to_zoom);
    }
}

fn follow_focused_vehicle(
    settings: Res<ViewSettings>,
    store: Res<FleetStore>,
    focus: Res<FocusedVehicle>,
    mut camera: ResMut<MapCamera>,
) {
    if !settings.follow_focused || !store.is_changed() {
        return;
    }
    let Some(vehicle) = focus.get().and_then(|id| store.vehicle(id)) else {
        return;
    };
    if camera.center != vehicle.position {
        camera.center = vehicle.position;
    }
}

pub struct MapCameraPlugin;

impl Plugin for MapCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapCamera>().add_systems(
            Update,
            (follow_focused_vehicle, center_on_requests)
                .chain()
                .in_set(FleetSet::Present),
        );
    }
}
