//! # TestFleet: headless harness for the fleet view engine
//!
//! Wraps `bevy::app::App` + `FleetViewPlugin` so integration tests and
//! benches can drive the engine frame by frame without a renderer.

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::camera::MapCamera;
use crate::commands::{CommandResult, CommandResultLog, FleetCommand, FleetCommandQueue};
use crate::config::ViewSettings;
use crate::feed::{FeedUpdate, FleetSnapshot};
use crate::filter_state::FilterState;
use crate::focus::FocusedVehicle;
use crate::observation::{CurrentObservation, FleetObservation};
use crate::signals::FleetSignals;
use crate::store::FleetStore;
use crate::vehicle::{Vehicle, VehicleId, Zone};
use crate::view::FleetView;
use crate::view_mode::ViewMode;
use crate::FleetViewPlugin;

pub struct TestFleet {
    app: App,
}

impl Default for TestFleet {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFleet {
    /// An empty fleet with default settings, after one update.
    pub fn new() -> Self {
        Self::with_settings(ViewSettings::default())
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.insert_resource(settings);
        app.add_plugins(FleetViewPlugin);
        app.update();
        Self { app }
    }

    /// Load a full snapshot and run one update.
    pub fn with_fleet(mut self, vehicles: Vec<Vehicle>, zones: Vec<Zone>) -> Self {
        self.feed(FeedUpdate::Snapshot(FleetSnapshot { vehicles, zones }));
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn feed(&mut self, update: FeedUpdate) {
        self.app.world_mut().send_event(update);
        self.app.update();
    }

    /// Queue one command and run one update.
    pub fn command(&mut self, command: FleetCommand) -> CommandResult {
        self.commands(vec![command]).pop().unwrap_or(CommandResult::Success)
    }

    /// Queue several commands, run one update, and return their results in
    /// order.
    pub fn commands(&mut self, commands: Vec<FleetCommand>) -> Vec<CommandResult> {
        let count = commands.len();
        {
            let mut queue = self.app.world_mut().resource_mut::<FleetCommandQueue>();
            for command in commands {
                queue.push(command);
            }
        }
        self.app.update();
        self.resource::<CommandResultLog>()
            .last_n(count)
            .iter()
            .map(|(_, result)| result.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn store(&self) -> &FleetStore {
        self.resource::<FleetStore>()
    }

    pub fn filter(&self) -> &FilterState {
        self.resource::<FilterState>()
    }

    pub fn view(&self) -> &FleetView {
        self.resource::<FleetView>()
    }

    pub fn focus(&self) -> Option<&VehicleId> {
        self.resource::<FocusedVehicle>().get()
    }

    pub fn mode(&self) -> ViewMode {
        *self.resource::<State<ViewMode>>().get()
    }

    pub fn signals(&self) -> &FleetSignals {
        self.resource::<FleetSignals>()
    }

    pub fn camera(&self) -> MapCamera {
        *self.resource::<MapCamera>()
    }

    pub fn observation(&self) -> Option<&FleetObservation> {
        self.resource::<CurrentObservation>().observation.as_ref()
    }

    /// Ids of the visible vehicles, in feed order.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.view().filtered.iter().map(|v| v.id.as_str()).collect()
    }
}
