//! The filter engine: one pure pass from store + filter state to the visible
//! vehicles. Map markers, list rows, and stats are all built from its output.

use std::collections::HashMap;

use crate::filter_state::FilterState;
use crate::search::SearchQuery;
use crate::vehicle::{Vehicle, Zone, ZoneId};

/// Zone id → zone lookup, built once per pass.
pub struct ZoneIndex<'a> {
    by_id: HashMap<&'a ZoneId, &'a Zone>,
}

impl<'a> ZoneIndex<'a> {
    pub fn new(zones: &'a [Zone]) -> Self {
        Self {
            by_id: zones.iter().map(|z| (&z.id, z)).collect(),
        }
    }

    pub fn get(&self, id: &ZoneId) -> Option<&'a Zone> {
        self.by_id.get(id).copied()
    }

    pub fn name(&self, id: &ZoneId) -> Option<&'a str> {
        self.get(id).map(|z| z.name.as_str())
    }
}

/// A filter state prepared for matching many vehicles.
pub struct CompiledFilter<'f, 'z> {
    filter: &'f FilterState,
    query: SearchQuery,
    zones: ZoneIndex<'z>,
}

impl<'f, 'z> CompiledFilter<'f, 'z> {
    pub fn new(filter: &'f FilterState, zones: &'z [Zone]) -> Self {
        Self {
            filter,
            query: SearchQuery::new(&filter.query),
            zones: ZoneIndex::new(zones),
        }
    }

    pub fn zones(&self) -> &ZoneIndex<'z> {
        &self.zones
    }

    /// All three dimensions must pass.
    pub fn passes(&self, vehicle: &Vehicle) -> bool {
        self.filter.zones.allows(&vehicle.zone)
            && self.filter.statuses.allows(&vehicle.status)
            && self
                .query
                .matches(vehicle, self.zones.name(&vehicle.zone))
    }
}

/// Filter `vehicles`, preserving input order.
pub fn filter_vehicles<'v>(
    vehicles: &'v [Vehicle],
    zones: &[Zone],
    filter: &FilterState,
) -> Vec<&'v Vehicle> {
    let compiled = CompiledFilter::new(filter, zones);
    vehicles.iter().filter(|v| compiled.passes(v)).collect()
}

/// Single-vehicle form of [`filter_vehicles`].
pub fn vehicle_passes(vehicle: &Vehicle, zones: &[Zone], filter: &FilterState) -> bool {
    CompiledFilter::new(filter, zones).passes(vehicle)
}
