use bevy::prelude::*;
use serde::Serialize;

use crate::config::ViewSettings;

/// Whether the fleet sidebar is expanded. Collapsing it hides the panel but
/// keeps every filter and the focus.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub open: bool,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

impl FromWorld for SidebarState {
    fn from_world(world: &mut World) -> Self {
        let open = world
            .get_resource::<ViewSettings>()
            .map(|s| s.sidebar_open)
            .unwrap_or(true);
        Self { open }
    }
}
