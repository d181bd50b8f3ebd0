//! Frame-scoped record of the signals the engine emitted.
//!
//! Event readers are the primary interface. `FleetSignals` exists for
//! consumers that poll once per frame (the headless console, tests) and need
//! to know what happened during the last update. Systems append to it at the
//! same point they send the event, so `frame()` is in emission order.

use bevy::prelude::*;
use serde::Serialize;

use crate::focus::{CenterOnVehicle, FocusCleared};
use crate::FleetSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum FleetSignal {
    CenterOn(CenterOnVehicle),
    FocusCleared(FocusCleared),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FleetSignals {
    frame: Vec<FleetSignal>,
}

impl FleetSignals {
    pub fn push(&mut self, signal: FleetSignal) {
        self.frame.push(signal);
    }

    pub fn frame(&self) -> &[FleetSignal] {
        &self.frame
    }

    pub fn center_requests(&self) -> impl Iterator<Item = &CenterOnVehicle> {
        self.frame.iter().filter_map(|s| match s {
            FleetSignal::CenterOn(c) => Some(c),
            FleetSignal::FocusCleared(_) => None,
        })
    }

    pub fn focus_cleared(&self) -> impl Iterator<Item = &FocusCleared> {
        self.frame.iter().filter_map(|s| match s {
            FleetSignal::FocusCleared(c) => Some(c),
            FleetSignal::CenterOn(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}

fn clear_signals(mut signals: ResMut<FleetSignals>) {
    if !signals.frame.is_empty() {
        signals.frame.clear();
    }
}

pub struct SignalsPlugin;

impl Plugin for SignalsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FleetSignals>().add_systems(
            PreUpdate,
            clear_signals
                .in_set(FleetSet::Ingest)
                .before(crate::feed::apply_feed_updates),
        );
    }
}
