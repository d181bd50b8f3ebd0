//! The fleet store: the current vehicle and zone snapshot.
//!
//! The store is the only owner of feed records. It has no logic of its own
//! beyond replacing records; every view is derived from it by the filter
//! engine.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::vehicle::{Vehicle, VehicleId, Zone, ZoneId};

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FleetStore {
    vehicles: Vec<Vehicle>,
    zones: Vec<Zone>,
}

impl FleetStore {
    pub fn new(vehicles: Vec<Vehicle>, zones: Vec<Zone>) -> Self {
        let mut store = Self::default();
        store.replace(vehicles, zones);
        store
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.vehicle(id).is_some()
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    pub fn zone_name(&self, id: &ZoneId) -> Option<&str> {
        self.zone(id).map(|z| z.name.as_str())
    }

    /// Replace the whole snapshot. Returns the number of duplicate vehicle
    /// records that were collapsed (last record wins, first position kept).
    pub fn replace(&mut self, vehicles: Vec<Vehicle>, zones: Vec<Zone>) -> usize {
        self.vehicles.clear();
        self.zones = zones;
        self.merge(vehicles)
    }

    /// Insert or replace vehicles by id. Replaced vehicles keep their position
    /// in the store order; new ones are appended. Returns how many records
    /// replaced an existing vehicle.
    pub fn upsert(&mut self, vehicles: Vec<Vehicle>) -> usize {
        self.merge(vehicles)
    }

    /// Remove vehicles by id. Unknown ids are ignored. Returns how many were
    /// removed.
    pub fn remove(&mut self, ids: &[VehicleId]) -> usize {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| !ids.contains(&v.id));
        before - self.vehicles.len()
    }

    pub fn replace_zones(&mut self, zones: Vec<Zone>) {
        self.zones = zones;
    }

    fn merge(&mut self, incoming: Vec<Vehicle>) -> usize {
        let mut index: HashMap<VehicleId, usize> = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();
        let mut replaced = 0;
        for vehicle in incoming {
            match index.get(&vehicle.id) {
                Some(&i) => {
                    self.vehicles[i] = vehicle;
                    replaced += 1;
                }
                None => {
                    index.insert(vehicle.id.clone(), self.vehicles.len());
                    self.vehicles.push(vehicle);
                }
            }
        }
        replaced
    }
}
