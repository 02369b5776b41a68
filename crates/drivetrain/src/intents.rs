use serde::{Deserialize, Serialize};

/// Driver intents sampled once per tick.
///
/// `throttle` is a held level. The shift and ignition flags are pulses: they
/// mean "pressed since the last tick" and are consumed by a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveIntents {
    pub throttle: bool,
    pub shift_up: bool,
    pub shift_down: bool,
    pub ignition_start: bool,
    pub ignition_stop: bool,
}

impl DriveIntents {
    /// No input at all: the car coasts or spins down.
    pub const IDLE: Self = Self {
        throttle: false,
        shift_up: false,
        shift_down: false,
        ignition_start: false,
        ignition_stop: false,
    };

    pub fn throttle() -> Self {
        Self {
            throttle: true,
            ..Self::IDLE
        }
    }

    pub fn shift_up() -> Self {
        Self {
            shift_up: true,
            ..Self::IDLE
        }
    }

    pub fn shift_down() -> Self {
        Self {
            shift_down: true,
            ..Self::IDLE
        }
    }

    pub fn ignition_start() -> Self {
        Self {
            ignition_start: true,
            ..Self::IDLE
        }
    }

    pub fn ignition_stop() -> Self {
        Self {
            ignition_stop: true,
            ..Self::IDLE
        }
    }

    /// Same intents with the throttle level replaced.
    pub fn with_throttle(mut self, held: bool) -> Self {
        self.throttle = held;
        self
    }

    /// OR the pulses of `other` into these intents. The throttle level of
    /// `self` is kept; `other.throttle` is ignored.
    pub fn merge_pulses(self, other: Self) -> Self {
        Self {
            throttle: self.throttle,
            shift_up: self.shift_up || other.shift_up,
            shift_down: self.shift_down || other.shift_down,
            ignition_start: self.ignition_start || other.ignition_start,
            ignition_stop: self.ignition_stop || other.ignition_stop,
        }
    }

    /// Drop the pulses and keep only the held throttle level.
    pub fn held_only(self) -> Self {
        Self::IDLE.with_throttle(self.throttle)
    }

    pub fn has_pulse(&self) -> bool {
        self.shift_up || self.shift_down || self.ignition_start || self.ignition_stop
    }
}
