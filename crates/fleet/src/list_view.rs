//! List-mode projection: one row per visible vehicle, optionally sorted.

use std::cmp::Ordering;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ViewSettings;
use crate::filter_engine::ZoneIndex;
use crate::vehicle::{Vehicle, VehicleId, VehicleStatus, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSortKey {
    /// Keep the filter engine's order (feed order).
    #[default]
    Feed,
    Name,
    Id,
    /// By zone name; vehicles with an unresolved zone always come last.
    Zone,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSort {
    pub key: ListSortKey,
    pub descending: bool,
}

impl ListSort {
    pub const fn by(key: ListSortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub const fn reversed(self) -> Self {
        Self {
            key: self.key,
            descending: !self.descending,
        }
    }
}

/// The sort currently applied to the list view.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder(pub ListSort);

impl FromWorld for ListOrder {
    fn from_world(world: &mut World) -> Self {
        let sort = world
            .get_resource::<ViewSettings>()
            .map(|s| s.list_sort)
            .unwrap_or_default();
        Self(sort)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: VehicleId,
    pub name: String,
    pub zone: ZoneId,
    /// `None` when the zone reference does not resolve.
    pub zone_name: Option<String>,
    pub status: VehicleStatus,
    pub focused: bool,
}

pub fn build_rows(
    visible: &[&Vehicle],
    zones: &ZoneIndex<'_>,
    sort: ListSort,
    focus: Option<&VehicleId>,
) -> Vec<ListRow> {
    let mut rows: Vec<ListRow> = visible
        .iter()
        .map(|v| ListRow {
            id: v.id.clone(),
            name: v.name.clone(),
            zone: v.zone.clone(),
            zone_name: zones.name(&v.zone).map(str::to_string),
            status: v.status.clone(),
            focused: focus == Some(&v.id),
        })
        .collect();

    if sort.key != ListSortKey::Feed {
        // `sort_by` is stable, so ties keep feed order in both directions.
        rows.sort_by(|a, b| compare_rows(a, b, sort));
    }
    rows
}

fn compare_rows(a: &ListRow, b: &ListRow, sort: ListSort) -> Ordering {
    let directed = |ord: Ordering| if sort.descending { ord.reverse() } else { ord };
    match sort.key {
        ListSortKey::Feed => Ordering::Equal,
        ListSortKey::Name => directed(cmp_text(&a.name, &b.name)),
        ListSortKey::Id => directed(cmp_text(a.id.as_str(), b.id.as_str())),
        ListSortKey::Status => directed(a.status.cmp(&b.status)),
        ListSortKey::Zone => match (&a.zone_name, &b.zone_name) {
            (Some(x), Some(y)) => directed(cmp_text(x, y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
