//! Feed ingestion: snapshot decoding and the `FeedUpdate` event.
//!
//! Transport is someone else's problem. Whatever receives telemetry turns it
//! into [`FeedUpdate`] events; `apply_feed_updates` folds them into the
//! [`FleetStore`] during the ingest phase, before any view is derived.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FleetError;
use crate::store::FleetStore;
use crate::vehicle::{Vehicle, VehicleId, Zone};
use crate::FleetSet;

/// A full vehicle + zone snapshot as delivered by the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Decode a JSON snapshot document.
pub fn parse_snapshot(json: &str) -> Result<FleetSnapshot, FleetError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_snapshot(path: &std::path::Path) -> Result<FleetSnapshot, FleetError> {
    let text = std::fs::read_to_string(path)?;
    parse_snapshot(&text)
}

/// A change pushed by the feed.
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedUpdate {
    /// Replace everything.
    Snapshot(FleetSnapshot),
    /// Insert or replace individual vehicles.
    UpsertVehicles { vehicles: Vec<Vehicle> },
    RemoveVehicles { ids: Vec<VehicleId> },
    ReplaceZones { zones: Vec<Zone> },
}

impl FeedUpdate {
    /// Apply this update to a store.
    pub fn apply(self, store: &mut FleetStore) {
        match self {
            FeedUpdate::Snapshot(snapshot) => {
                let vehicle_count = snapshot.vehicles.len();
                let zone_count = snapshot.zones.len();
                let dups = store.replace(snapshot.vehicles, snapshot.zones);
                if dups > 0 {
                    warn!("fleet snapshot contained {dups} duplicate vehicle ids; last record kept");
                }
                info!(
                    "fleet snapshot applied: {} vehicles, {} zones",
                    vehicle_count - dups,
                    zone_count
                );
            }
            FeedUpdate::UpsertVehicles { vehicles } => {
                let count = vehicles.len();
                let replaced = store.upsert(vehicles);
                debug!(
                    "fleet upsert: {replaced} replaced, {} added",
                    count - replaced
                );
            }
            FeedUpdate::RemoveVehicles { ids } => {
                let removed = store.remove(&ids);
                debug!("fleet removal: {removed} of {} ids present", ids.len());
            }
            FeedUpdate::ReplaceZones { zones } => {
                debug!("fleet zones replaced: {}", zones.len());
                store.replace_zones(zones);
            }
        }
    }
}

/// Fold all pending feed updates into the store, in arrival order.
pub fn apply_feed_updates(mut updates: EventReader<FeedUpdate>, mut store: ResMut<FleetStore>) {
    for update in updates.read() {
        update.clone().apply(&mut store);
    }
}

pub struct FeedPlugin;

impl Plugin for FeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FleetStore>()
            .add_event::<FeedUpdate>()
            .add_systems(PreUpdate, apply_feed_updates.in_set(FleetSet::Ingest));
    }
}
