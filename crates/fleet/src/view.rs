//! Derived sidebar projections.
//!
//! Everything a renderer shows is recomputed here from one consistent
//! snapshot of the store, the filters, the list order and the focus. The
//! focus check runs against the same filtered set that feeds the markers and
//! rows, so no projection ever highlights a vehicle that is not visible.

use bevy::prelude::*;
use serde::Serialize;

use crate::filter_engine::{filter_vehicles, ZoneIndex};
use crate::filter_state::{zone_checklist, FilterState, ZoneCheck};
use crate::focus::{vehicle_detail, FocusCleared, FocusedVehicle, VehicleDetail};
use crate::list_view::{build_rows, ListOrder, ListRow, ListSort};
use crate::map_view::{build_markers, MapMarker};
use crate::signals::{FleetSignal, FleetSignals};
use crate::stats::{aggregate, FleetStats, SidebarSummary};
use crate::store::FleetStore;
use crate::vehicle::{Vehicle, VehicleId};
use crate::FleetSet;

/// Cached projections, refreshed whenever an input changes.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetView {
    /// Visible vehicles in feed order.
    pub filtered: Vec<Vehicle>,
    pub stats: FleetStats,
    pub summary: SidebarSummary,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<ListRow>,
    pub zone_checklist: Vec<ZoneCheck>,
    pub detail: Option<VehicleDetail>,
}

impl FleetView {
    pub fn is_visible(&self, id: &VehicleId) -> bool {
        self.filtered.iter().any(|v| &v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub view: FleetView,
    /// Set when the focused vehicle is no longer visible and focus must drop.
    pub cleared: Option<FocusCleared>,
}

pub fn derive_view(
    store: &FleetStore,
    filter: &FilterState,
    sort: ListSort,
    focus: &FocusedVehicle,
) -> Derivation {
    let visible = filter_vehicles(store.vehicles(), store.zones(), filter);
    let cleared = focus.invalidation(store, &visible);
    let effective = if cleared.is_some() { None } else { focus.get() };

    let index = ZoneIndex::new(store.zones());
    let stats = aggregate(visible.iter().copied(), store.zones());
    let view = FleetView {
        summary: SidebarSummary::from_stats(&stats),
        stats,
        markers: build_markers(&visible, effective),
        rows: build_rows(&visible, &index, sort, effective),
        zone_checklist: zone_checklist(store.zones(), &filter.zones),
        detail: vehicle_detail(effective, store),
        filtered: visible.into_iter().cloned().collect(),
    };
    Derivation { view, cleared }
}

pub fn derive_fleet_view(
    store: Res<FleetStore>,
    filter: Res<FilterState>,
    order: Res<ListOrder>,
    mut focus: ResMut<FocusedVehicle>,
    mut view: ResMut<FleetView>,
    mut cleared_events: EventWriter<FocusCleared>,
    mut signals: ResMut<FleetSignals>,
) {
    if !(store.is_changed() || filter.is_changed() || order.is_changed() || focus.is_changed()) {
        return;
    }

    let derivation = derive_view(&store, &filter, order.0, &focus);
    if let Some(cleared) = derivation.cleared {
        info!(
            "focus on {} dropped: {:?}",
            cleared.vehicle, cleared.reason
        );
        focus.0 = None;
        signals.push(FleetSignal::FocusCleared(cleared.clone()));
        cleared_events.send(cleared);
    }
    *view = derivation.view;
}

pub struct FleetViewDerivePlugin;

impl Plugin for FleetViewDerivePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FleetView>()
            .add_systems(Update, derive_fleet_view.in_set(FleetSet::Derive));
    }
}
