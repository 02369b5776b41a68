use bevy::prelude::*;

use crate::sets::DrivetrainSet;

use super::systems::{log_speed_readout, record_telemetry, step_vehicles};
use super::types::{DrivetrainTelemetry, IgnitionEvent, ShiftEvent, SpeedReadoutTimer};

/// Registers the per-vehicle drivetrain systems in `FixedUpdate`.
///
/// Does not touch the fixed timestep; [`crate::DrivetrainPlugin`] owns that.
pub struct VehiclesPlugin;

impl Plugin for VehiclesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrivetrainTelemetry>()
            .init_resource::<SpeedReadoutTimer>()
            .add_event::<ShiftEvent>()
            .add_event::<IgnitionEvent>()
            .add_systems(FixedUpdate, step_vehicles.in_set(DrivetrainSet::Step))
            .add_systems(
                FixedUpdate,
                (record_telemetry, log_speed_readout).in_set(DrivetrainSet::Report),
            );
    }
}
