use std::f32::consts::PI;

use crate::config::DrivetrainConfig;
use crate::state::DrivetrainState;

const MS_TO_KMH: f32 = 3.6;
const SECONDS_PER_MINUTE: f32 = 60.0;

/// Road speed implied by engine speed and the engaged gear.
///
/// Wheel rpm is `rpm / (gear_ratio * differential_ratio)`; one wheel turn
/// covers `PI * 2r` metres. Zero in neutral or with the engine off.
pub(crate) fn road_speed_kmh(state: &DrivetrainState, config: &DrivetrainConfig) -> f32 {
    if !state.ignition_on || state.gear == 0 || state.rpm <= 0.0 {
        return 0.0;
    }
    debug_assert!(
        state.gear <= config.last_gear(),
        "gear {} out of range",
        state.gear
    );
    let ratio = config.gear_ratios[state.gear];

    let wheel_circumference = PI * (2.0 * config.wheel_radius_meters);
    let metres_per_second =
        state.rpm * wheel_circumference / (SECONDS_PER_MINUTE * ratio * config.differential_ratio);
    metres_per_second * MS_TO_KMH
}
