use crate::config::{DrivetrainConfig, NEUTRAL_COAST_SCALE, NEUTRAL_THROTTLE_SCALE};
use crate::intents::DriveIntents;
use crate::state::DrivetrainState;

use super::types::IgnitionChange;

/// Apply the ignition pulses of this tick.
///
/// Start runs before stop, so a tick carrying both leaves the engine off.
/// Starting snaps rpm up to the idle floor.
pub(crate) fn apply_ignition(
    state: &mut DrivetrainState,
    config: &DrivetrainConfig,
    intents: &DriveIntents,
) -> Option<IgnitionChange> {
    let was_on = state.ignition_on;

    if intents.ignition_start && !state.ignition_on {
        state.ignition_on = true;
        if state.rpm < config.min_rpm {
            state.rpm = config.min_rpm;
        }
    }

    if intents.ignition_stop {
        state.ignition_on = false;
    }

    match (was_on, state.ignition_on) {
        (false, true) => Some(IgnitionChange::Started),
        (true, false) => Some(IgnitionChange::Stopped),
        _ => None,
    }
}

/// rpm change per second for the current ignition, gear and throttle.
pub(crate) fn rpm_rate(state: &DrivetrainState, config: &DrivetrainConfig, throttle: bool) -> f32 {
    if !state.ignition_on {
        return -config.rpm_decrease_rate_ignition_off;
    }

    match (state.in_neutral(), throttle) {
        (false, true) => config.rpm_increase_rate,
        (false, false) => -config.rpm_decrease_rate,
        (true, true) => config.rpm_increase_rate * NEUTRAL_THROTTLE_SCALE,
        (true, false) => -config.rpm_decrease_rate * NEUTRAL_COAST_SCALE,
    }
}

/// Integrate engine speed over `dt` seconds and re-establish the rpm bounds.
pub(crate) fn integrate_rpm(
    state: &mut DrivetrainState,
    config: &DrivetrainConfig,
    throttle: bool,
    dt: f32,
) {
    state.rpm += rpm_rate(state, config, throttle) * dt;
    state.rpm = clamp_rpm(state.rpm, state.ignition_on, config);
}

/// Running engines stay within [min_rpm, max_rpm]; a stopped engine only
/// has to stay non-negative.
pub(crate) fn clamp_rpm(rpm: f32, ignition_on: bool, config: &DrivetrainConfig) -> f32 {
    if ignition_on {
        rpm.clamp(config.min_rpm, config.max_rpm)
    } else {
        rpm.clamp(0.0, config.max_rpm)
    }
}
