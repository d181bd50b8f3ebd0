use bevy::prelude::*;

pub mod camera;
pub mod commands;
pub mod config;
pub mod demo_feed;
pub mod error;
pub mod feed;
pub mod filter_engine;
pub mod filter_state;
pub mod focus;
pub mod list_view;
pub mod map_view;
pub mod observation;
pub mod protocol;
pub mod search;
pub mod sidebar;
pub mod signals;
pub mod stats;
pub mod store;
pub mod vehicle;
pub mod view;
pub mod view_mode;

mod plugin_registration;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use error::FleetError;
pub use vehicle::{GeoPosition, Vehicle, VehicleId, VehicleStatus, Zone, ZoneId};

/// Frame phases of the view engine.
///
/// `Ingest` (PreUpdate) folds feed updates and user commands into the source
/// resources. The view mode transition runs right after it, so `Derive` and
/// `Present` (Update) always see this frame's inputs.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FleetSet {
    Ingest,
    /// Recompute projections and reconcile focus.
    Derive,
    /// Camera and signal bookkeeping.
    Present,
    Observe,
}

pub struct FleetViewPlugin;

impl Plugin for FleetViewPlugin {
    fn build(&self, app: &mut App) {
        // Settings first: several resources read them in `FromWorld`.
        app.init_resource::<config::ViewSettings>()
            .configure_sets(PreUpdate, FleetSet::Ingest)
            .configure_sets(
                Update,
                (FleetSet::Derive, FleetSet::Present, FleetSet::Observe).chain(),
            );

        plugin_registration::register_feature_plugins(app);
    }
}
