use bevy::prelude::*;

use crate::simulator::{ShiftOutcome, StepReport};

use super::types::{
    DrivetrainTelemetry, IgnitionEvent, IntentLatch, ShiftEvent, SpeedReadoutTimer, Vehicle,
};

/// Advance every vehicle by one fixed timestep using the intents latched
/// since the previous tick.
pub fn step_vehicles(
    time: Res<Time<Fixed>>,
    mut vehicles: Query<(Entity, &mut Vehicle, &mut IntentLatch)>,
    mut shift_events: EventWriter<ShiftEvent>,
    mut ignition_events: EventWriter<IgnitionEvent>,
) {
    let dt = time.delta_secs();

    for (entity, mut vehicle, mut latch) in &mut vehicles {
        let intents = latch.take();
        let report = match vehicle.simulator_mut().step(intents, dt) {
            Ok(report) => report,
            Err(e) => {
                warn!("Vehicle {:?}: skipping drivetrain step: {}", entity, e);
                continue;
            }
        };

        let StepReport { ignition, shift } = report;

        if let Some(change) = ignition {
            debug!("Vehicle {:?}: ignition {:?}", entity, change);
            ignition_events.send(IgnitionEvent {
                vehicle: entity,
                change,
            });
        }

        if let Some(outcome) = shift {
            log_shift(entity, &outcome, vehicle.state().rpm);
            shift_events.send(ShiftEvent {
                vehicle: entity,
                outcome,
            });
        }
    }
}

fn log_shift(entity: Entity, outcome: &ShiftOutcome, rpm: f32) {
    match outcome {
        ShiftOutcome::Upshift { from, to } | ShiftOutcome::Downshift { from, to } => {
            debug!(
                "Vehicle {:?}: gear {} -> {} at {:.0} rpm",
                entity, from, to, rpm
            );
        }
        ShiftOutcome::Rejected { direction, reason } => {
            debug!(
                "Vehicle {:?}: {:?} shift refused ({:?}) at {:.0} rpm",
                entity, direction, reason, rpm
            );
        }
    }
}

/// Publish every vehicle's post-step state and drop despawned vehicles.
pub fn record_telemetry(
    vehicles: Query<(Entity, &Vehicle)>,
    mut telemetry: ResMut<DrivetrainTelemetry>,
) {
    telemetry.ticks += 1;
    telemetry.states.clear();
    for (entity, vehicle) in &vehicles {
        telemetry.states.insert(entity, vehicle.state());
    }
}

/// Periodic speed readout, one line per vehicle.
pub fn log_speed_readout(
    mut timer: ResMut<SpeedReadoutTimer>,
    vehicles: Query<(Entity, &Vehicle, Option<&Name>)>,
) {
    timer.tick();
    if !timer.should_run() {
        return;
    }

    for (entity, vehicle, name) in &vehicles {
        let state = vehicle.state();
        let label = name.map_or_else(|| format!("{entity:?}"), |n| n.as_str().to_string());
        info!(
            "{}: {:.1} km/h, gear {}, {:.0} rpm",
            label, state.speed_kmh, state.gear, state.rpm
        );
    }
}
