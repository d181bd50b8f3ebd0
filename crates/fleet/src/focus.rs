//! Selection/focus coordination.
//!
//! At most one vehicle is focused. Focusing a vehicle (or moving focus to a
//! different one) emits [`CenterOnVehicle`] for the map camera. Focus is
//! dropped, with a [`FocusCleared`] signal and no centering, when the vehicle
//! leaves the store or the filtered set. The detail panel is derived from
//! focus and has no state of its own.

use bevy::prelude::*;
use serde::Serialize;

use crate::error::FleetError;
use crate::filter_engine::vehicle_passes;
use crate::filter_state::FilterState;
use crate::store::FleetStore;
use crate::vehicle::{GeoPosition, Vehicle, VehicleId, VehicleStatus, ZoneId};

// ---------------------------------------------------------------------------
// Resources and events
// ---------------------------------------------------------------------------

/// Resource tracking the focused vehicle.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FocusedVehicle(pub Option<VehicleId>);

/// Ask the map renderer to center on a vehicle.
#[derive(Event, Debug, Clone, PartialEq, Serialize)]
pub struct CenterOnVehicle {
    pub vehicle: VehicleId,
    pub position: GeoPosition,
}

impl CenterOnVehicle {
    fn of(vehicle: &Vehicle) -> Self {
        Self {
            vehicle: vehicle.id.clone(),
            position: vehicle.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusClearReason {
    /// Explicit `select(None)`.
    Deselected,
    /// The active filters no longer show the vehicle.
    FilteredOut,
    /// The feed dropped the vehicle.
    RemovedFromStore,
}

#[derive(Event, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusCleared {
    pub vehicle: VehicleId,
    pub reason: FocusClearReason,
}

/// Outcome of a successful selection call.
#[derive(Debug, Clone, PartialEq)]
pub enum FocusChange {
    /// Same vehicle re-selected, or `None` while nothing was focused.
    Unchanged,
    Focused(CenterOnVehicle),
    Cleared(FocusCleared),
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

impl FocusedVehicle {
    pub fn get(&self) -> Option<&VehicleId> {
        self.0.as_ref()
    }

    /// Focus `target`, or clear focus with `None`.
    ///
    /// The vehicle must be in the store and pass the current filters. On
    /// error the focus is left exactly as it was.
    pub fn select(
        &mut self,
        target: Option<&VehicleId>,
        store: &FleetStore,
        filter: &FilterState,
    ) -> Result<FocusChange, FleetError> {
        let Some(id) = target else {
            return Ok(match self.0.take() {
                Some(vehicle) => FocusChange::Cleared(FocusCleared {
                    vehicle,
                    reason: FocusClearReason::Deselected,
                }),
                None => FocusChange::Unchanged,
            });
        };

        let vehicle = visible_vehicle(id, store, filter)?;
        if self.0.as_ref() == Some(id) {
            return Ok(FocusChange::Unchanged);
        }
        self.0 = Some(id.clone());
        Ok(FocusChange::Focused(CenterOnVehicle::of(vehicle)))
    }

    /// Why the current focus is no longer valid, if it isn't. `visible` is
    /// the filter engine's output for the same store snapshot.
    pub fn invalidation(&self, store: &FleetStore, visible: &[&Vehicle]) -> Option<FocusCleared> {
        let id = self.0.as_ref()?;
        let reason = if !store.contains(id) {
            FocusClearReason::RemovedFromStore
        } else if !visible.iter().any(|v| &v.id == id) {
            FocusClearReason::FilteredOut
        } else {
            return None;
        };
        Some(FocusCleared {
            vehicle: id.clone(),
            reason,
        })
    }

    /// Clear focus if [`FocusedVehicle::invalidation`] says so.
    pub fn reconcile(&mut self, store: &FleetStore, visible: &[&Vehicle]) -> Option<FocusCleared> {
        let cleared = self.invalidation(store, visible)?;
        self.0 = None;
        Some(cleared)
    }
}

/// Center request for a vehicle without touching focus (the list's "locate"
/// button).
pub fn fly_to(
    id: &VehicleId,
    store: &FleetStore,
    filter: &FilterState,
) -> Result<CenterOnVehicle, FleetError> {
    visible_vehicle(id, store, filter).map(CenterOnVehicle::of)
}

fn visible_vehicle<'s>(
    id: &VehicleId,
    store: &'s FleetStore,
    filter: &FilterState,
) -> Result<&'s Vehicle, FleetError> {
    let vehicle = store
        .vehicle(id)
        .ok_or_else(|| FleetError::VehicleNotFound(id.clone()))?;
    if !vehicle_passes(vehicle, store.zones(), filter) {
        return Err(FleetError::VehicleHidden(id.clone()));
    }
    Ok(vehicle)
}

// ---------------------------------------------------------------------------
// Detail panel
// ---------------------------------------------------------------------------

/// Contents of the detail panel for the focused vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetail {
    pub id: VehicleId,
    pub name: String,
    pub zone: ZoneId,
    pub zone_name: Option<String>,
    pub status: VehicleStatus,
    pub position: GeoPosition,
}

/// `None` whenever nothing is focused, which is what hides the panel.
pub fn vehicle_detail(focus: Option<&VehicleId>, store: &FleetStore) -> Option<VehicleDetail> {
    let vehicle = store.vehicle(focus?)?;
    Some(VehicleDetail {
        id: vehicle.id.clone(),
        name: vehicle.name.clone(),
        zone: vehicle.zone.clone(),
        zone_name: store.zone_name(&vehicle.zone).map(str::to_string),
        status: vehicle.status.clone(),
        position: vehicle.position,
    })
}

pub struct FocusPlugin;

impl Plugin for FocusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusedVehicle>()
            .add_event::<CenterOnVehicle>()
            .add_event::<FocusCleared>();
    }
}
