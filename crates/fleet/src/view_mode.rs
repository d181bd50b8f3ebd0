//! Sidebar presentation mode.
//!
//! [`ViewMode`] is a Bevy [`States`] enum: every mode is reachable from every
//! other one through `NextState::set`. It only selects which projection a
//! renderer draws; filters, focus, and the store are untouched by a switch.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use serde::{Deserialize, Serialize};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Map markers plus the zone checklist.
    #[default]
    Map,
    /// Sortable vehicle list.
    List,
    /// Per-zone and per-status counts.
    Stats,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Map, ViewMode::List, ViewMode::Stats];
}

fn log_view_mode_change(mode: Res<State<ViewMode>>) {
    if mode.is_changed() && !mode.is_added() {
        debug!("view mode -> {:?}", mode.get());
    }
}

pub struct ViewModePlugin;

impl Plugin for ViewModePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<StatesPlugin>() {
            app.add_plugins(StatesPlugin);
        }
        app.init_state::<ViewMode>()
            .add_systems(Update, log_view_mode_change);
    }
}
