use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter_engine::ZoneIndex;
use crate::vehicle::{Vehicle, VehicleStatus, Zone, ZoneId};

/// Counts for the stats view, computed over the filtered vehicles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    /// Every known zone, including empty ones.
    pub per_zone: BTreeMap<ZoneId, usize>,
    /// Only statuses that occur.
    pub per_status: BTreeMap<VehicleStatus, usize>,
    pub total: usize,
    /// Vehicles whose zone reference does not resolve.
    pub unknown_zone: usize,
}

impl FleetStats {
    pub fn zone_count(&self, zone: &ZoneId) -> usize {
        self.per_zone.get(zone).copied().unwrap_or(0)
    }

    pub fn status_count(&self, status: VehicleStatus) -> usize {
        self.per_status.get(&status).copied().unwrap_or(0)
    }
}

pub fn aggregate<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>, zones: &[Zone]) -> FleetStats {
    let index = ZoneIndex::new(zones);
    let mut stats = FleetStats {
        per_zone: zones.iter().map(|z| (z.id.clone(), 0)).collect(),
        ..Default::default()
    };

    for vehicle in vehicles {
        stats.total += 1;
        *stats.per_status.entry(vehicle.status.clone()).or_insert(0) += 1;
        match index.get(&vehicle.zone) {
            Some(zone) => {
                if let Some(count) = stats.per_zone.get_mut(&zone.id) {
                    *count += 1;
                }
            }
            None => stats.unknown_zone += 1,
        }
    }
    stats
}

/// The two headline numbers above the sidebar tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SidebarSummary {
    pub visible: usize,
    pub available: usize,
}

impl SidebarSummary {
    pub fn from_stats(stats: &FleetStats) -> Self {
        Self {
            visible: stats.total,
            available: stats.status_count(VehicleStatus::Available),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::GeoPosition;

    fn v(id: &str, zone: &str, status: VehicleStatus) -> Vehicle {
        Vehicle::new(id, id, zone, status, GeoPosition::default())
    }

    #[test]
    fn test_aggregate_empty() {
        let none: Vec<Vehicle> = Vec::new();
        let stats = aggregate(&none, &[Zone::new("Z1", "North")]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.zone_count(&ZoneId::new("Z1")), 0);
        assert!(stats.per_status.is_empty());
    }

    #[test]
    fn test_unknown_zone_excluded_from_per_zone_only() {
        let vehicles = vec![
            v("T1", "Z1", VehicleStatus::Available),
            v("T2", "ghost", VehicleStatus::Busy),
        ];
        let zones = vec![Zone::new("Z1", "North")];
        let stats = aggregate(&vehicles, &zones);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.unknown_zone, 1);
        assert_eq!(stats.per_zone.len(), 1);
        assert_eq!(stats.per_zone.values().sum::<usize>(), 1);
        assert_eq!(stats.status_count(VehicleStatus::Busy), 1);
    }

    #[test]
    fn test_empty_zone_listed_with_zero() {
        let vehicles = vec![v("T1", "Z1", VehicleStatus::Available)];
        let zones = vec![Zone::new("Z1", "North"), Zone::new("Z2", "South")];
        let stats = aggregate(&vehicles, &zones);
        assert_eq!(stats.zone_count(&ZoneId::new("Z2")), 0);
        assert!(stats.per_zone.contains_key(&ZoneId::new("Z2")));
    }

    #[test]
    fn test_summary_counts_available() {
        let vehicles = vec![
            v("T1", "Z1", VehicleStatus::Available),
            v("T2", "Z1", VehicleStatus::Available),
            v("T3", "Z1", VehicleStatus::Offline),
        ];
        let summary = SidebarSummary::from_stats(&aggregate(&vehicles, &[]));
        assert_eq!(summary, SidebarSummary { visible: 3, available: 2 });
    }

    #[test]
    fn test_stats_serialize_as_string_keys() {
        let vehicles = vec![v("T1", "Z1", VehicleStatus::Available)];
        let stats = aggregate(&vehicles, &[Zone::new("Z1", "North")]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["per_zone"]["Z1"], 1);
        assert_eq!(json["per_status"]["available"], 1);
    }
}
