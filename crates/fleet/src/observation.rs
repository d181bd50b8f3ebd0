//! Builds a `FleetObservation` snapshot at the end of every update.
//!
//! `build_observation` runs in `FleetSet::Observe`, after every projection and
//! camera write of the frame has settled.

use bevy::prelude::*;
use serde::Serialize;

use crate::camera::MapCamera;
use crate::commands::{CommandResult, CommandResultLog, FleetCommand};
use crate::filter_state::FilterState;
use crate::focus::FocusedVehicle;
use crate::sidebar::SidebarState;
use crate::signals::{FleetSignal, FleetSignals};
use crate::store::FleetStore;
use crate::vehicle::VehicleId;
use crate::view::FleetView;
use crate::view_mode::ViewMode;
use crate::FleetSet;

/// How many command results an observation carries.
const RECENT_RESULTS: usize = 10;

/// Longest command summary, in characters.
const SUMMARY_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResultEntry {
    pub command_summary: String,
    pub success: bool,
}

/// Everything a front end needs to draw the sidebar and the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetObservation {
    pub mode: ViewMode,
    /// Vehicles in the store, visible or not.
    pub fleet_size: usize,
    pub filter: FilterState,
    pub focus: Option<VehicleId>,
    pub sidebar: SidebarState,
    pub camera: MapCamera,
    pub view: FleetView,
    /// Signals emitted during the last update.
    pub signals: Vec<FleetSignal>,
    pub recent_command_results: Vec<CommandResultEntry>,
}

/// The most recent observation, refreshed every update.
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentObservation {
    pub observation: Option<FleetObservation>,
}

/// Debug text of `command`, cut to [`SUMMARY_CHARS`] on a char boundary.
fn summarize(command: &FleetCommand) -> String {
    format!("{command:?}").chars().take(SUMMARY_CHARS).collect()
}

#[allow(clippy::too_many_arguments)]
pub fn build_observation(
    mode: Res<State<ViewMode>>,
    store: Res<FleetStore>,
    filter: Res<FilterState>,
    focus: Res<FocusedVehicle>,
    sidebar: Res<SidebarState>,
    camera: Res<MapCamera>,
    view: Res<FleetView>,
    signals: Res<FleetSignals>,
    log: Res<CommandResultLog>,
    mut current: ResMut<CurrentObservation>,
) {
    let recent_command_results = log
        .last_n(RECENT_RESULTS)
        .iter()
        .map(|(command, result)| {
            CommandResultEntry {
                command_summary: summarize(command),
                success: matches!(result, CommandResult::Success),
            }
        })
        .collect();

    current.observation = Some(FleetObservation {
        mode: *mode.get(),
        fleet_size: store.len(),
        filter: filter.clone(),
        focus: focus.0.clone(),
        sidebar: *sidebar,
        camera: *camera,
        view: view.clone(),
        signals: signals.frame().to_vec(),
        recent_command_results,
    });
}

pub struct ObservationPlugin;

impl Plugin for ObservationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentObservation>()
            .add_systems(Update, build_observation.in_set(FleetSet::Observe));
    }
}
