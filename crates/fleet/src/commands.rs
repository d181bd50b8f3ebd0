//! User-intent commands for the fleet sidebar.
//!
//! UI layers push [`FleetCommand`]s onto the [`FleetCommandQueue`]; the
//! executor drains it during the ingest phase (after feed updates) so every
//! derived view of the frame sees the result. Each command's outcome is
//! recorded in the [`CommandResultLog`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::COMMAND_LOG_CAPACITY;
use crate::error::FleetError;
use crate::filter_state::FilterState;
use crate::focus::{fly_to, CenterOnVehicle, FocusChange, FocusCleared, FocusedVehicle};
use crate::list_view::{ListOrder, ListSort};
use crate::sidebar::SidebarState;
use crate::signals::{FleetSignal, FleetSignals};
use crate::store::FleetStore;
use crate::vehicle::{VehicleId, VehicleStatus, ZoneId};
use crate::view_mode::ViewMode;
use crate::FleetSet;

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleetCommand {
    ToggleZone { zone: ZoneId },
    SelectAllZones,
    ClearAllZones,
    ToggleStatus { status: VehicleStatus },
    ClearStatuses,
    SetQuery { text: String },
    SetViewMode { mode: ViewMode },
    /// Focus a vehicle, or clear focus with `None`.
    Select { vehicle: Option<VehicleId> },
    /// Center the map on a vehicle without focusing it.
    FlyTo { vehicle: VehicleId },
    SetListSort { sort: ListSort },
    ToggleSidebar,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FleetCommandQueue {
    pending: Vec<FleetCommand>,
}

impl FleetCommandQueue {
    pub fn push(&mut self, command: FleetCommand) {
        self.pending.push(command);
    }

    pub fn drain(&mut self) -> Vec<FleetCommand> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CommandResult {
    Success,
    Rejected { kind: String, message: String },
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandResult::Success)
    }
}

impl From<FleetError> for CommandResult {
    fn from(err: FleetError) -> Self {
        CommandResult::Rejected {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Ring buffer of the last [`COMMAND_LOG_CAPACITY`] command/result pairs.
#[derive(Resource, Debug, Clone, Default)]
pub struct CommandResultLog {
    entries: Vec<(FleetCommand, CommandResult)>,
}

impl CommandResultLog {
    pub fn push(&mut self, command: FleetCommand, result: CommandResult) {
        if self.entries.len() >= COMMAND_LOG_CAPACITY {
            self.entries.remove(0);
        }
        self.entries.push((command, result));
    }

    pub fn last_n(&self, n: usize) -> &[(FleetCommand, CommandResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&(FleetCommand, CommandResult)> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Everything a command may touch, borrowed for one frame.
pub struct CommandTargets<'a> {
    pub store: &'a FleetStore,
    pub filter: &'a mut FilterState,
    pub focus: &'a mut FocusedVehicle,
    pub order: &'a mut ListOrder,
    pub sidebar: &'a mut SidebarState,
    pub next_mode: &'a mut NextState<ViewMode>,
}

/// Signals produced by a single command.
#[derive(Debug, Default, PartialEq)]
pub struct CommandEffects {
    pub center: Option<CenterOnVehicle>,
    pub cleared: Option<FocusCleared>,
}

/// Apply one command. Filter and sort changes never fail; selection and
/// fly-to fail with [`FleetError`] and leave state untouched.
pub fn execute_command(
    command: &FleetCommand,
    targets: &mut CommandTargets<'_>,
) -> Result<CommandEffects, FleetError> {
    let mut effects = CommandEffects::default();
    match command {
        FleetCommand::ToggleZone { zone } => targets.filter.toggle_zone(zone.clone()),
        FleetCommand::SelectAllZones => targets.filter.select_all_zones(),
        FleetCommand::ClearAllZones => targets.filter.clear_all_zones(),
        FleetCommand::ToggleStatus { status } => targets.filter.toggle_status(status.clone()),
        FleetCommand::ClearStatuses => targets.filter.clear_statuses(),
        FleetCommand::SetQuery { text } => targets.filter.set_query(text.clone()),
        FleetCommand::SetViewMode { mode } => targets.next_mode.set(*mode),
        FleetCommand::Select { vehicle } => {
            match targets
                .focus
                .select(vehicle.as_ref(), targets.store, targets.filter)?
            {
                FocusChange::Unchanged => {}
                FocusChange::Focused(center) => effects.center = Some(center),
                FocusChange::Cleared(cleared) => effects.cleared = Some(cleared),
            }
        }
        FleetCommand::FlyTo { vehicle } => {
            effects.center = Some(fly_to(vehicle, targets.store, targets.filter)?);
        }
        FleetCommand::SetListSort { sort } => targets.order.0 = *sort,
        FleetCommand::ToggleSidebar => targets.sidebar.toggle(),
    }
    Ok(effects)
}

/// Drains the queue and applies every command in order.
#[allow(clippy::too_many_arguments)]
pub fn execute_fleet_commands(
    mut queue: ResMut<FleetCommandQueue>,
    mut log: ResMut<CommandResultLog>,
    store: Res<FleetStore>,
    mut filter: ResMut<FilterState>,
    mut focus: ResMut<FocusedVehicle>,
    mut order: ResMut<ListOrder>,
    mut sidebar: ResMut<SidebarState>,
    mut next_mode: ResMut<NextState<ViewMode>>,
    mut centers: EventWriter<CenterOnVehicle>,
    mut cleared: EventWriter<FocusCleared>,
    mut signals: ResMut<FleetSignals>,
) {
    if queue.is_empty() {
        return;
    }
    let mut targets = CommandTargets {
        store: &store,
        filter: &mut filter,
        focus: &mut focus,
        order: &mut order,
        sidebar: &mut sidebar,
        next_mode: &mut next_mode,
    };

    for command in queue.drain() {
        let result = match execute_command(&command, &mut targets) {
            Ok(effects) => {
                if let Some(center) = effects.center {
                    debug!("center on {}", center.vehicle);
                    signals.push(FleetSignal::CenterOn(center.clone()));
                    centers.send(center);
                }
                if let Some(c) = effects.cleared {
                    info!("focus cleared: {} ({:?})", c.vehicle, c.reason);
                    signals.push(FleetSignal::FocusCleared(c.clone()));
                    cleared.send(c);
                }
                CommandResult::Success
            }
            Err(err) => {
                debug!("fleet command {command:?} rejected: {err}");
                CommandResult::from(err)
            }
        };
        log.push(command, result);
    }
}

pub struct FleetCommandsPlugin;

impl Plugin for FleetCommandsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FleetCommandQueue>()
            .init_resource::<CommandResultLog>()
            .init_resource::<FilterState>()
            .init_resource::<ListOrder>()
            .init_resource::<SidebarState>()
            .add_systems(
                PreUpdate,
                execute_fleet_commands
                    .in_set(FleetSet::Ingest)
                    .after(crate::feed::apply_feed_updates),
            );
    }
}
