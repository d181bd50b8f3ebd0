//! Console text protocol for the headless `dispatch-console` binary.
//!
//! Newline-delimited JSON: each stdin line is one [`ConsoleCommand`], each
//! stdout line one [`ConsoleResponse`]. The types live in the engine crate so
//! they can be tested without the binary; the I/O loop lives in
//! `crates/app/src/console_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::commands::{CommandResult, FleetCommand};
use crate::feed::FeedUpdate;
use crate::observation::FleetObservation;
use crate::signals::FleetSignal;

// ---------------------------------------------------------------------------
// Commands (stdin -> engine)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum ConsoleCommand {
    /// Request the current observation.
    #[serde(rename = "observe")]
    Observe,

    /// Run one fleet command and advance one update.
    #[serde(rename = "act")]
    Act { command: FleetCommand },

    /// Run several fleet commands in order within a single update.
    #[serde(rename = "batch_act")]
    BatchAct { commands: Vec<FleetCommand> },

    /// Inject a feed update and advance one update.
    #[serde(rename = "feed")]
    Feed { update: FeedUpdate },

    /// Replace the store from a snapshot file.
    #[serde(rename = "load_snapshot")]
    LoadSnapshot { path: String },

    /// Apply one drift step from the demo feed.
    #[serde(rename = "demo_step")]
    DemoStep,

    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (engine -> stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ConsoleResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready { fleet_size: usize },

    #[serde(rename = "observation")]
    Observation { observation: Box<FleetObservation> },

    /// Result of an `act`, plus the signals that update produced.
    #[serde(rename = "command_result")]
    CommandResult {
        result: CommandResult,
        signals: Vec<FleetSignal>,
    },

    #[serde(rename = "batch_result")]
    BatchResult {
        results: Vec<CommandResult>,
        signals: Vec<FleetSignal>,
    },

    /// Generic acknowledgement (feed, load_snapshot, demo_step).
    #[serde(rename = "ok")]
    Ok { fleet_size: usize },

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

/// Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> ConsoleResponse {
    ConsoleResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{VehicleId, ZoneId};
    use crate::view_mode::ViewMode;

    #[test]
    fn deserialize_observe_command() {
        let cmd: ConsoleCommand = serde_json::from_str(r#"{"cmd":"observe"}"#).unwrap();
        assert!(matches!(cmd, ConsoleCommand::Observe));
    }

    #[test]
    fn deserialize_act_command() {
        let json = r#"{"cmd":"act","command":{"SetViewMode":{"mode":"stats"}}}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        let ConsoleCommand::Act { command } = cmd else {
            panic!("expected Act");
        };
        assert_eq!(command, FleetCommand::SetViewMode { mode: ViewMode::Stats });
    }

    #[test]
    fn deserialize_batch_act_command() {
        let json = r#"{"cmd":"batch_act","commands":[{"ToggleZone":{"zone":"Z1"}},{"Select":{"vehicle":"T1"}}]}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        let ConsoleCommand::BatchAct { commands } = cmd else {
            panic!("expected BatchAct");
        };
        assert_eq!(
            commands,
            vec![
                FleetCommand::ToggleZone { zone: ZoneId::new("Z1") },
                FleetCommand::Select {
                    vehicle: Some(VehicleId::new("T1"))
                },
            ]
        );
    }

    #[test]
    fn deserialize_feed_command() {
        let json = r#"{"cmd":"feed","update":{"kind":"remove_vehicles","ids":["T1","T2"]}}"#;
        let cmd: ConsoleCommand = serde_json::from_str(json).unwrap();
        let ConsoleCommand::Feed { update } = cmd else {
            panic!("expected Feed");
        };
        assert_eq!(
            update,
            FeedUpdate::RemoveVehicles {
                ids: vec![VehicleId::new("T1"), VehicleId::new("T2")]
            }
        );
    }

    #[test]
    fn deserialize_load_snapshot_and_demo_step() {
        let cmd: ConsoleCommand =
            serde_json::from_str(r#"{"cmd":"load_snapshot","path":"/tmp/fleet.json"}"#).unwrap();
        assert!(matches!(cmd, ConsoleCommand::LoadSnapshot { ref path } if path == "/tmp/fleet.json"));
        let cmd: ConsoleCommand = serde_json::from_str(r#"{"cmd":"demo_step"}"#).unwrap();
        assert!(matches!(cmd, ConsoleCommand::DemoStep));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(serde_json::from_str::<ConsoleCommand>(r#"{"cmd":"explode"}"#).is_err());
    }

    #[test]
    fn serialize_ready_response() {
        let json = serde_json::to_value(make_response(ResponsePayload::Ready { fleet_size: 3 })).unwrap();
        assert_eq!(json["protocol_version"], 1);
        assert_eq!(json["type"], "ready");
        assert_eq!(json["fleet_size"], 3);
    }

    #[test]
    fn serialize_command_result_response() {
        let resp = make_response(ResponsePayload::CommandResult {
            result: CommandResult::Rejected {
                kind: "hidden".into(),
                message: "vehicle T1 is hidden by the active filters".into(),
            },
            signals: vec![],
        });
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["type"], "command_result");
        assert_eq!(json["result"]["Rejected"]["kind"], "hidden");
        assert!(json["signals"].as_array().unwrap().is_empty());
    }

    #[test]
    fn serialize_error_and_goodbye() {
        let json = serde_json::to_value(make_response(ResponsePayload::Error {
            message: "bad input".into(),
        }))
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "bad input");
        let json = serde_json::to_value(make_response(ResponsePayload::Goodbye)).unwrap();
        assert_eq!(json["type"], "goodbye");
    }
}
