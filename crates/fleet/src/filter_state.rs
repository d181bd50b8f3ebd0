//! Filter state: zone scope, status scope, and the free-text query.
//!
//! "Nothing selected" on a dimension means "no restriction", never "match
//! nothing". [`Scope`] makes that explicit: an empty selection is never
//! stored, it collapses to [`Scope::All`].

use std::collections::BTreeSet;

use bevy::prelude::*;
use serde::Serialize;

use crate::vehicle::{VehicleStatus, Zone, ZoneId};

// =============================================================================
// Scope
// =============================================================================

/// Restriction on one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "selected", rename_all = "snake_case")]
pub enum Scope<T: Ord> {
    /// No restriction.
    All,
    /// Only these values pass. Never empty.
    Subset(BTreeSet<T>),
}

impl<T: Ord> Default for Scope<T> {
    fn default() -> Self {
        Scope::All
    }
}

impl<T: Ord> Scope<T> {
    /// Whether `value` passes this dimension.
    pub fn allows(&self, value: &T) -> bool {
        match self {
            Scope::All => true,
            Scope::Subset(set) => set.contains(value),
        }
    }

    /// Add `value` if absent, remove it if present.
    pub fn toggle(&mut self, value: T) {
        match self {
            Scope::All => {
                *self = Scope::Subset(BTreeSet::from([value]));
            }
            Scope::Subset(set) => {
                if !set.remove(&value) {
                    set.insert(value);
                }
                if set.is_empty() {
                    *self = Scope::All;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Scope::All;
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Scope::All)
    }

    /// Explicitly selected values, empty for `All`.
    pub fn selected(&self) -> impl Iterator<Item = &T> {
        let set = match self {
            Scope::All => None,
            Scope::Subset(set) => Some(set),
        };
        set.into_iter().flatten()
    }

    pub fn selected_count(&self) -> usize {
        match self {
            Scope::All => 0,
            Scope::Subset(set) => set.len(),
        }
    }
}

pub type ZoneScope = Scope<ZoneId>;
pub type StatusScope = Scope<VehicleStatus>;

// =============================================================================
// FilterState resource
// =============================================================================

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub zones: ZoneScope,
    pub statuses: StatusScope,
    /// Raw query text, stored verbatim. Lowering happens at match time.
    pub query: String,
}

impl FilterState {
    pub fn toggle_zone(&mut self, zone: ZoneId) {
        self.zones.toggle(zone);
    }

    /// "Select all" resets to the `All` sentinel, the same state as
    /// [`FilterState::clear_all_zones`]: every zone passes.
    pub fn select_all_zones(&mut self) {
        self.zones.clear();
    }

    pub fn clear_all_zones(&mut self) {
        self.zones.clear();
    }

    pub fn toggle_status(&mut self, status: VehicleStatus) {
        self.statuses.toggle(status);
    }

    pub fn clear_statuses(&mut self) {
        self.statuses.clear();
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// True when no dimension restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        self.zones.is_all() && self.statuses.is_all() && self.query.is_empty()
    }
}

// =============================================================================
// Zone checklist
// =============================================================================

/// One row of the zone filter checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCheck {
    pub id: ZoneId,
    pub name: String,
    pub checked: bool,
}

/// Checklist rows for the zone filter panel, in zone order. A row is checked
/// only when its zone is explicitly selected, so under `All` every row is
/// unchecked and clicking a row always flips that row.
pub fn zone_checklist(zones: &[Zone], scope: &ZoneScope) -> Vec<ZoneCheck> {
    let selected: BTreeSet<&ZoneId> = scope.selected().collect();
    zones
        .iter()
        .map(|zone| ZoneCheck {
            id: zone.id.clone(),
            name: zone.name.clone(),
            checked: selected.contains(&zone.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(id: &str) -> ZoneId {
        ZoneId::new(id)
    }

    #[test]
    fn test_default_is_unrestricted() {
        let state = FilterState::default();
        assert!(state.is_unrestricted());
        assert!(state.zones.allows(&z("anything")));
        assert!(state.statuses.allows(&VehicleStatus::Offline));
    }

    #[test]
    fn test_toggle_twice_restores_all() {
        let mut state = FilterState::default();
        state.toggle_zone(z("Z1"));
        assert!(!state.zones.is_all());
        state.toggle_zone(z("Z1"));
        assert_eq!(state.zones, Scope::All);
    }

    #[test]
    fn test_toggle_twice_restores_subset() {
        let mut state = FilterState::default();
        state.toggle_zone(z("Z2"));
        let original = state.clone();
        state.toggle_zone(z("Z1"));
        state.toggle_zone(z("Z1"));
        assert_eq!(state, original);
    }

    #[test]
    fn test_removing_last_zone_never_leaves_empty_subset() {
        let mut scope = ZoneScope::default();
        scope.toggle(z("Z1"));
        scope.toggle(z("Z2"));
        scope.toggle(z("Z1"));
        scope.toggle(z("Z2"));
        assert!(scope.is_all());
        assert_eq!(scope.selected_count(), 0);
    }

    #[test]
    fn test_unknown_zone_toggle_is_safe() {
        let mut state = FilterState::default();
        state.toggle_zone(z("does-not-exist"));
        assert!(state.zones.allows(&z("does-not-exist")));
        assert!(!state.zones.allows(&z("Z1")));
    }

    #[test]
    fn test_select_all_and_clear_all_are_inverses() {
        let mut state = FilterState::default();
        state.toggle_zone(z("Z1"));
        state.select_all_zones();
        assert!(state.zones.is_all());
        state.toggle_zone(z("Z3"));
        state.clear_all_zones();
        assert!(state.zones.is_all());
    }

    #[test]
    fn test_status_toggle_symmetric() {
        let mut state = FilterState::default();
        state.toggle_status(VehicleStatus::Available);
        assert!(state.statuses.allows(&VehicleStatus::Available));
        assert!(!state.statuses.allows(&VehicleStatus::Busy));
        state.toggle_status(VehicleStatus::Available);
        assert!(state.statuses.is_all());
    }

    #[test]
    fn test_query_stored_verbatim() {
        let mut state = FilterState::default();
        state.set_query("  Mixed Case ");
        assert_eq!(state.query, "  Mixed Case ");
        assert!(!state.is_unrestricted());
    }

    #[test]
    fn test_selected_lists_subset_in_order() {
        let mut scope = ZoneScope::default();
        scope.toggle(z("Z2"));
        scope.toggle(z("Z1"));
        let selected: Vec<_> = scope.selected().map(|id| id.as_str()).collect();
        assert_eq!(selected, vec!["Z1", "Z2"]);
        assert_eq!(ZoneScope::All.selected().count(), 0);
    }

    #[test]
    fn test_zone_checklist() {
        let zones = vec![Zone::new("Z1", "North"), Zone::new("Z2", "South")];
        let all = zone_checklist(&zones, &ZoneScope::All);
        assert!(all.iter().all(|row| !row.checked));

        let mut scope = ZoneScope::default();
        scope.toggle(z("Z2"));
        let rows = zone_checklist(&zones, &scope);
        assert!(!rows[0].checked);
        assert!(rows[1].checked);
        assert_eq!(rows[1].name, "South");
    }

    #[test]
    fn test_toggled_row_flips() {
        let zones = vec![Zone::new("Z1", "North"), Zone::new("Z2", "South")];
        let mut scope = ZoneScope::default();
        for _ in 0..2 {
            let before = zone_checklist(&zones, &scope);
            scope.toggle(z("Z1"));
            let after = zone_checklist(&zones, &scope);
            assert_ne!(before[0].checked, after[0].checked);
            assert_eq!(before[1].checked, after[1].checked);
        }
    }

    #[test]
    fn test_scope_serializes_tagged() {
        let mut scope = ZoneScope::default();
        assert_eq!(serde_json::to_string(&scope).unwrap(), r#"{"kind":"all"}"#);
        scope.toggle(z("Z1"));
        assert_eq!(
            serde_json::to_string(&scope).unwrap(),
            r#"{"kind":"subset","selected":["Z1"]}"#
        );
    }
}
