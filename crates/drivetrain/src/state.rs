use serde::{Deserialize, Serialize};

/// Coarse view of the drivetrain as a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineMode {
    /// Ignition off. The engine may still be spinning down.
    Off,
    /// Engine running in neutral.
    Idle,
    /// Engine running with a forward gear engaged.
    Driving,
}

/// Snapshot of the engine and transmission after a step.
///
/// `speed_kmh` is derived from `rpm` and `gear` on every step and is never
/// read back as an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrivetrainState {
    pub ignition_on: bool,
    pub rpm: f32,
    /// 0 is neutral.
    pub gear: usize,
    pub speed_kmh: f32,
}

impl DrivetrainState {
    /// Engine off, stationary, in neutral.
    pub const PARKED: Self = Self {
        ignition_on: false,
        rpm: 0.0,
        gear: 0,
        speed_kmh: 0.0,
    };

    pub fn mode(&self) -> EngineMode {
        match (self.ignition_on, self.gear) {
            (false, _) => EngineMode::Off,
            (true, 0) => EngineMode::Idle,
            (true, _) => EngineMode::Driving,
        }
    }

    pub fn in_neutral(&self) -> bool {
        self.gear == 0
    }
}
