//! Deterministic synthetic feed for demos, benches and the headless console.
//!
//! Wraps `ChaCha8Rng` so the same seed always yields the same fleet and the
//! same sequence of drift updates on every platform.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_MAP_CENTER;
use crate::feed::{FeedUpdate, FleetSnapshot};
use crate::store::FleetStore;
use crate::vehicle::{GeoPosition, Vehicle, VehicleStatus, Zone};

pub const DEFAULT_DEMO_SEED: u64 = 0x7A_C1_5E_ED;

const DEMO_ZONES: [(&str, &str); 6] = [
    ("Z-N", "North"),
    ("Z-S", "South"),
    ("Z-E", "East"),
    ("Z-W", "West"),
    ("Z-C", "Central"),
    ("Z-H", "Harbor"),
];

const DRIVER_NAMES: [&str; 12] = [
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
    "Juliett", "Kilo", "Lima",
];

/// Degrees of lat/lng a vehicle can be from the map center.
const SPREAD: f64 = 0.08;
/// Largest single-step move.
const DRIFT_STEP: f64 = 0.002;
/// Chance that a drifting vehicle also changes status.
const STATUS_FLIP_CHANCE: f64 = 0.15;

#[derive(Resource, Debug, Clone)]
pub struct DemoFeed {
    rng: ChaCha8Rng,
}

impl Default for DemoFeed {
    fn default() -> Self {
        Self::from_seed(DEFAULT_DEMO_SEED)
    }
}

impl DemoFeed {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn random_status(&mut self) -> VehicleStatus {
        VehicleStatus::ALL[self.rng.gen_range(0..VehicleStatus::ALL.len())].clone()
    }

    /// A fresh fleet of `count` vehicles spread over the demo zones.
    pub fn snapshot(&mut self, count: usize) -> FleetSnapshot {
        let zones: Vec<Zone> = DEMO_ZONES
            .iter()
            .map(|(id, name)| Zone::new(*id, *name))
            .collect();

        let vehicles = (0..count)
            .map(|i| {
                let zone = DEMO_ZONES[self.rng.gen_range(0..DEMO_ZONES.len())].0;
                let name = format!(
                    "{} {}",
                    DRIVER_NAMES[i % DRIVER_NAMES.len()],
                    i / DRIVER_NAMES.len() + 1
                );
                let position = GeoPosition::new(
                    DEFAULT_MAP_CENTER.lat + self.rng.gen_range(-SPREAD..SPREAD),
                    DEFAULT_MAP_CENTER.lng + self.rng.gen_range(-SPREAD..SPREAD),
                );
                let status = self.random_status();
                Vehicle::new(format!("T{:03}", i + 1), name, zone, status, position)
            })
            .collect();

        FleetSnapshot { vehicles, zones }
    }

    /// Move a random quarter of the fleet (at least one vehicle) a small step,
    /// occasionally changing status.
    pub fn drift(&mut self, store: &FleetStore) -> FeedUpdate {
        let movers = (store.len() / 4).max(1).min(store.len());
        let mut vehicles: Vec<Vehicle> = store
            .vehicles()
            .choose_multiple(&mut self.rng, movers)
            .cloned()
            .collect();

        for vehicle in &mut vehicles {
            vehicle.position.lat += self.rng.gen_range(-DRIFT_STEP..DRIFT_STEP);
            vehicle.position.lng += self.rng.gen_range(-DRIFT_STEP..DRIFT_STEP);
            if self.rng.gen_bool(STATUS_FLIP_CHANCE) {
                vehicle.status = self.random_status();
            }
        }
        FeedUpdate::UpsertVehicles { vehicles }
    }
}
