use serde::{Deserialize, Serialize};

/// Direction of a requested gear change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftDirection {
    Up,
    Down,
}

/// Why a gear change request was dropped.
///
/// None of these are faults; they are ordinary driving constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftRejection {
    /// Upshift requested in the highest gear.
    TopGear,
    /// Downshift requested in neutral.
    Neutral,
    /// Upshift requested below `min_rpm_for_upshift`.
    InsufficientRpm,
    /// Downshift would over-rev the engine.
    RpmTooHigh,
}

/// Result of the gear-shift phase of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftOutcome {
    Upshift {
        from: usize,
        to: usize,
    },
    Downshift {
        from: usize,
        to: usize,
    },
    Rejected {
        direction: ShiftDirection,
        reason: ShiftRejection,
    },
}

impl ShiftOutcome {
    pub fn is_shift(&self) -> bool {
        matches!(
            self,
            ShiftOutcome::Upshift { .. } | ShiftOutcome::Downshift { .. }
        )
    }
}

/// Ignition transition applied by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnitionChange {
    Started,
    Stopped,
}

/// Everything notable that happened during one step, besides the new state.
///
/// When both an up and a down request arrive in the same tick and the upshift
/// succeeds, the down request is not evaluated and does not appear here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub ignition: Option<IgnitionChange>,
    pub shift: Option<ShiftOutcome>,
}
