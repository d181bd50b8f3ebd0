// ---------------------------------------------------------------------------
// FleetError: typed failures for selection and feed decoding
// ---------------------------------------------------------------------------

use std::fmt;

use crate::vehicle::VehicleId;

/// Errors surfaced by fleet commands and feed/config loading.
///
/// None of these are fatal. A rejected command leaves every resource exactly
/// as it was; the caller decides whether to show anything.
#[derive(Debug)]
pub enum FleetError {
    /// The vehicle id is not present in the fleet store.
    VehicleNotFound(VehicleId),
    /// The vehicle exists but the active filters hide it.
    VehicleHidden(VehicleId),
    /// A feed snapshot or settings document could not be decoded.
    Decode(String),
    /// I/O error while reading a snapshot or settings file.
    Io(std::io::Error),
}

impl FleetError {
    /// Short machine-readable tag used by the console protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            FleetError::VehicleNotFound(_) => "not_found",
            FleetError::VehicleHidden(_) => "hidden",
            FleetError::Decode(_) => "decode",
            FleetError::Io(_) => "io",
        }
    }
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::VehicleNotFound(id) => write!(f, "Vehicle not found: {id}"),
            FleetError::VehicleHidden(id) => {
                write!(f, "Vehicle {id} is hidden by the active filters")
            }
            FleetError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            FleetError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for FleetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FleetError {
    fn from(e: std::io::Error) -> Self {
        FleetError::Io(e)
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(e: serde_json::Error) -> Self {
        FleetError::Decode(e.to_string())
    }
}
