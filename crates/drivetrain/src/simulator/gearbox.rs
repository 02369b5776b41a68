use crate::config::DrivetrainConfig;
use crate::intents::DriveIntents;
use crate::state::DrivetrainState;

use super::types::{ShiftDirection, ShiftOutcome, ShiftRejection};

/// Engine speed the engine would reach after dropping from `gear` to
/// `gear - 1` at `rpm`, before the shift-down factor is applied.
///
/// Returns 0 for neutral and first gear, where the check does not apply.
pub fn projected_rpm_after_downshift(config: &DrivetrainConfig, gear: usize, rpm: f32) -> f32 {
    if gear <= 1 || gear >= config.gear_ratios.len() {
        return 0.0;
    }
    rpm * config.gear_ratios[gear - 1] / config.gear_ratios[gear]
}

/// Evaluate the shift requests of this tick. At most one gear change happens.
///
/// An upshift request is evaluated first; the downshift request is only
/// looked at when there was no upshift request or it was rejected.
pub(crate) fn evaluate_shift(
    state: &mut DrivetrainState,
    config: &DrivetrainConfig,
    intents: &DriveIntents,
) -> Option<ShiftOutcome> {
    let mut outcome = None;

    if intents.shift_up {
        let up = try_shift_up(state, config);
        if up.is_shift() {
            return Some(up);
        }
        outcome = Some(up);
    }

    if intents.shift_down {
        outcome = Some(try_shift_down(state, config));
    }

    outcome
}

fn try_shift_up(state: &mut DrivetrainState, config: &DrivetrainConfig) -> ShiftOutcome {
    if state.gear >= config.last_gear() {
        return rejected(ShiftDirection::Up, ShiftRejection::TopGear);
    }
    // Neutral into first is always allowed.
    if state.gear != 0 && state.rpm < config.min_rpm_for_upshift {
        return rejected(ShiftDirection::Up, ShiftRejection::InsufficientRpm);
    }

    let from = state.gear;
    state.gear += 1;
    state.rpm = shifted_rpm(state.rpm, config.shift_up_rpm_factor, config);
    ShiftOutcome::Upshift {
        from,
        to: state.gear,
    }
}

fn try_shift_down(state: &mut DrivetrainState, config: &DrivetrainConfig) -> ShiftOutcome {
    if state.gear == 0 {
        return rejected(ShiftDirection::Down, ShiftRejection::Neutral);
    }

    let allowed = state.gear == 1
        || state.rpm <= config.max_rpm_for_downshift
        || projected_rpm_after_downshift(config, state.gear, state.rpm) <= config.max_rpm;
    if !allowed {
        return rejected(ShiftDirection::Down, ShiftRejection::RpmTooHigh);
    }

    let from = state.gear;
    state.gear -= 1;
    // Dropping into neutral leaves the engine speed alone.
    if state.gear > 0 {
        state.rpm = shifted_rpm(state.rpm, config.shift_down_rpm_factor, config);
    }
    ShiftOutcome::Downshift {
        from,
        to: state.gear,
    }
}

/// The shift factor result is always clamped to the running band, even with
/// the ignition off: a gear change with a stopped engine lands on idle rpm and
/// then spins down again on the following ticks.
fn shifted_rpm(rpm: f32, factor: f32, config: &DrivetrainConfig) -> f32 {
    (rpm * factor).clamp(config.min_rpm, config.max_rpm)
}

fn rejected(direction: ShiftDirection, reason: ShiftRejection) -> ShiftOutcome {
    ShiftOutcome::Rejected { direction, reason }
}
