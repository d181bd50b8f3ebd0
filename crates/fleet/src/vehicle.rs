//! Feed records: vehicles, zones, and the identifiers that link them.
//!
//! These are plain data as delivered by the telemetry feed. The engine never
//! mutates a [`Vehicle`] in place; a refresh replaces it wholesale.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Stable vehicle identifier (e.g. `"T1"`), unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Zone identifier. Vehicles reference zones by this id; the reference may
/// dangle if the zone list does not contain it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Status and position
// ---------------------------------------------------------------------------

/// Availability status reported by the feed.
///
/// Only `Available` has special meaning to the engine (sidebar summary); the
/// other variants are ordinary filter values. Labels the engine does not know
/// are kept verbatim in `Other` so they still filter and aggregate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleStatus {
    Available,
    Busy,
    Offline,
    Other(String),
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::Busy,
        VehicleStatus::Offline,
    ];

    pub fn is_available(&self) -> bool {
        *self == VehicleStatus::Available
    }

    pub fn label(&self) -> &str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Busy => "busy",
            VehicleStatus::Offline => "offline",
            VehicleStatus::Other(label) => label,
        }
    }
}

impl From<String> for VehicleStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "available" | "disponible" => VehicleStatus::Available,
            "busy" => VehicleStatus::Busy,
            "offline" => VehicleStatus::Offline,
            _ => VehicleStatus::Other(label),
        }
    }
}

impl From<VehicleStatus> for String {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPosition {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(alias = "commune")]
    pub zone: ZoneId,
    pub status: VehicleStatus,
    #[serde(default)]
    pub position: GeoPosition,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        zone: impl Into<String>,
        status: VehicleStatus,
        position: GeoPosition,
    ) -> Self {
        Self {
            id: VehicleId(id.into()),
            name: name.into(),
            zone: ZoneId(zone.into()),
            status,
            position,
        }
    }
}

/// A dispatch zone. `boundary` is carried through for map renderers and is
/// never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<serde_json::Value>,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId(id.into()),
            name: name.into(),
            boundary: None,
        }
    }
}
