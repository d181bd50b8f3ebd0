//! Headless console session: a blocking loop that reads JSON commands and
//! writes JSON responses, one per line.
//!
//! ## Protocol
//!
//! Each input line is a JSON object with a `"cmd"` discriminator. Each output
//! line is a JSON response with `"protocol_version"` and `"type"` fields. See
//! [`fleet::protocol`] for the full schema. Logs go to stderr so they never
//! interleave with the protocol stream.

use std::io::{BufRead, Write};
use std::path::Path;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use fleet::commands::{CommandResult, CommandResultLog, FleetCommandQueue};
use fleet::config::{ViewSettings, COMMAND_LOG_CAPACITY};
use fleet::demo_feed::DemoFeed;
use fleet::feed::{load_snapshot, FeedUpdate, FleetSnapshot};
use fleet::observation::CurrentObservation;
use fleet::protocol::{make_response, ConsoleCommand, ConsoleResponse, ResponsePayload};
use fleet::signals::FleetSignals;
use fleet::store::FleetStore;

/// Build the engine app without any window, renderer or logger.
pub fn build_console_app(settings: ViewSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(settings);
    app.add_plugins(fleet::FleetViewPlugin);
    app
}

/// Seed the store before the session starts and run the first update.
pub fn prime(app: &mut App, snapshot: Option<FleetSnapshot>, demo: Option<DemoFeed>) {
    if let Some(demo) = demo {
        app.insert_resource(demo);
    }
    if let Some(snapshot) = snapshot {
        app.world_mut().send_event(FeedUpdate::Snapshot(snapshot));
    }
    app.update();
}

/// Run the command loop until `quit` or end of input.
pub fn run_session(app: &mut App, input: impl BufRead, mut output: impl Write) -> std::io::Result<()> {
    let fleet_size = fleet_size(app);
    emit(&mut output, &make_response(ResponsePayload::Ready { fleet_size }))?;
    info!("dispatch console ready with {fleet_size} vehicles, waiting for commands");

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ConsoleCommand>(&line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        emit(&mut output, &response)?;
        if is_goodbye {
            break;
        }
    }

    info!("dispatch console shutting down");
    Ok(())
}

fn emit(output: &mut impl Write, response: &ConsoleResponse) -> std::io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    writeln!(output)?;
    output.flush()
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: ConsoleCommand, app: &mut App) -> ConsoleResponse {
    match cmd {
        ConsoleCommand::Observe => match app
            .world()
            .get_resource::<CurrentObservation>()
            .and_then(|c| c.observation.clone())
        {
            Some(observation) => make_response(ResponsePayload::Observation {
                observation: Box::new(observation),
            }),
            None => error("no observation available yet"),
        },

        ConsoleCommand::Act { command } => {
            app.world_mut().resource_mut::<FleetCommandQueue>().push(command);
            app.update();
            let result = last_results(app, 1)
                .pop()
                .unwrap_or(CommandResult::Success);
            make_response(ResponsePayload::CommandResult {
                result,
                signals: frame_signals(app),
            })
        }

        ConsoleCommand::BatchAct { commands } => {
            if commands.len() > COMMAND_LOG_CAPACITY {
                return error(&format!(
                    "batch of {} commands exceeds the limit of {COMMAND_LOG_CAPACITY}",
                    commands.len()
                ));
            }
            let count = commands.len();
            {
                let mut queue = app.world_mut().resource_mut::<FleetCommandQueue>();
                for command in commands {
                    queue.push(command);
                }
            }
            app.update();
            make_response(ResponsePayload::BatchResult {
                results: last_results(app, count),
                signals: frame_signals(app),
            })
        }

        ConsoleCommand::Feed { update } => apply_feed(app, update),

        ConsoleCommand::LoadSnapshot { path } => match load_snapshot(Path::new(&path)) {
            Ok(snapshot) => apply_feed(app, FeedUpdate::Snapshot(snapshot)),
            Err(e) => {
                warn!("could not load snapshot {path}: {e}");
                error(&format!("could not load {path}: {e}"))
            }
        },

        ConsoleCommand::DemoStep => {
            if !app.world().contains_resource::<DemoFeed>() {
                return error("demo feed not enabled; start with --demo SEED");
            }
            let update = app
                .world_mut()
                .resource_scope(|world, mut demo: Mut<DemoFeed>| {
                    demo.drift(world.resource::<FleetStore>())
                });
            apply_feed(app, update)
        }

        ConsoleCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}

fn apply_feed(app: &mut App, update: FeedUpdate) -> ConsoleResponse {
    app.world_mut().send_event(update);
    app.update();
    make_response(ResponsePayload::Ok {
        fleet_size: fleet_size(app),
    })
}

fn error(message: &str) -> ConsoleResponse {
    make_response(ResponsePayload::Error {
        message: message.to_string(),
    })
}

fn fleet_size(app: &App) -> usize {
    app.world().get_resource::<FleetStore>().map_or(0, FleetStore::len)
}

fn last_results(app: &App, n: usize) -> Vec<CommandResult> {
    app.world()
        .get_resource::<CommandResultLog>()
        .map(|log| log.last_n(n).iter().map(|(_, r)| r.clone()).collect())
        .unwrap_or_default()
}

fn frame_signals(app: &App) -> Vec<fleet::signals::FleetSignal> {
    app.world()
        .get_resource::<FleetSignals>()
        .map(|s| s.frame().to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet::{GeoPosition, Vehicle, VehicleStatus, Zone};
    use serde_json::Value;

    fn session(lines: &[&str]) -> Vec<Value> {
        let snapshot = FleetSnapshot {
            vehicles: vec![
                Vehicle::new("T1", "Alpha", "Z1", VehicleStatus::Available, GeoPosition::new(48.9, 2.3)),
                Vehicle::new("T2", "Beta", "Z2", VehicleStatus::Busy, GeoPosition::new(48.8, 2.4)),
            ],
            zones: vec![Zone::new("Z1", "North"), Zone::new("Z2", "South")],
        };
        let mut app = build_console_app(ViewSettings::default());
        prime(&mut app, Some(snapshot), Some(DemoFeed::from_seed(5)));

        let input = lines.join("\n");
        let mut output = Vec::new();
        run_session(&mut app, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_ready_then_goodbye() {
        let out = session(&[r#"{"cmd":"quit"}"#, r#"{"cmd":"observe"}"#]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["type"], "ready");
        assert_eq!(out[0]["fleet_size"], 2);
        assert_eq!(out[1]["type"], "goodbye");
    }

    #[test]
    fn test_select_reports_center_signal() {
        let out = session(&[r#"{"cmd":"act","command":{"Select":{"vehicle":"T2"}}}"#]);
        assert_eq!(out[1]["type"], "command_result");
        assert_eq!(out[1]["result"], "Success");
        assert_eq!(out[1]["signals"][0]["signal"], "center_on");
        assert_eq!(out[1]["signals"][0]["vehicle"], "T2");
    }

    #[test]
    fn test_batch_filter_clears_focus() {
        let out = session(&[
            r#"{"cmd":"batch_act","commands":[{"Select":{"vehicle":"T1"}},{"ToggleZone":{"zone":"Z2"}}]}"#,
            r#"{"cmd":"observe"}"#,
        ]);
        assert_eq!(out[1]["type"], "batch_result");
        assert_eq!(out[1]["results"].as_array().unwrap().len(), 2);
        let observation = &out[2]["observation"];
        assert!(observation["focus"].is_null());
        assert_eq!(observation["view"]["filtered"].as_array().unwrap().len(), 1);
        assert_eq!(observation["view"]["stats"]["per_zone"]["Z2"], 1);
    }

    #[test]
    fn test_bad_input_reports_error_and_continues() {
        let out = session(&["not json", r#"{"cmd":"observe"}"#]);
        assert_eq!(out[1]["type"], "error");
        assert_eq!(out[2]["type"], "observation");
        assert_eq!(out[2]["observation"]["mode"], "map");
    }

    #[test]
    fn test_feed_and_demo_step() {
        let out = session(&[
            r#"{"cmd":"feed","update":{"kind":"remove_vehicles","ids":["T1"]}}"#,
            r#"{"cmd":"demo_step"}"#,
            r#"{"cmd":"load_snapshot","path":"/nonexistent/fleet.json"}"#,
        ]);
        assert_eq!(out[1]["type"], "ok");
        assert_eq!(out[1]["fleet_size"], 1);
        assert_eq!(out[2]["type"], "ok");
        assert_eq!(out[2]["fleet_size"], 1);
        assert_eq!(out[3]["type"], "error");
    }
}
