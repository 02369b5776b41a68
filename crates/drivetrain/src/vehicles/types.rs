use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::DrivetrainConfig;
use crate::error::ConfigError;
use crate::intents::DriveIntents;
use crate::simulator::{IgnitionChange, ShiftOutcome, Simulator};
use crate::state::DrivetrainState;

/// A vehicle entity's drivetrain. Each vehicle owns its own simulator; nothing
/// is shared between vehicles.
#[derive(Component, Debug, Clone, Default)]
pub struct Vehicle {
    simulator: Simulator,
}

impl Vehicle {
    pub fn new(config: DrivetrainConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            simulator: Simulator::new(config)?,
        })
    }

    pub fn state(&self) -> DrivetrainState {
        self.simulator.state()
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.simulator
    }
}

/// Collects driver input between fixed ticks.
///
/// Hosts may press buttons several times per frame or several frames per
/// tick; pulses are OR-ed together until the next step consumes them. The
/// throttle is a held level and only changes through [`Self::set_throttle`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IntentLatch {
    pending: DriveIntents,
}

impl IntentLatch {
    /// Record the pulses of a sample. The held throttle is left untouched.
    pub fn press(&mut self, intents: DriveIntents) {
        self.pending = self.pending.merge_pulses(intents);
    }

    pub fn set_throttle(&mut self, held: bool) {
        self.pending.throttle = held;
    }

    /// Intents waiting for the next step.
    pub fn pending(&self) -> DriveIntents {
        self.pending
    }

    /// Hand out this tick's intents and clear the pulses.
    pub fn take(&mut self) -> DriveIntents {
        let intents = self.pending;
        self.pending = intents.held_only();
        intents
    }
}

/// Fired when a vehicle's shift phase produced an outcome, accepted or not.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftEvent {
    pub vehicle: Entity,
    pub outcome: ShiftOutcome,
}

/// Fired when a vehicle's engine starts or stops.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnitionEvent {
    pub vehicle: Entity,
    pub change: IgnitionChange,
}

/// Latest post-step state of every vehicle, for UI and telemetry readers.
#[derive(Resource, Debug, Default)]
pub struct DrivetrainTelemetry {
    pub states: BTreeMap<Entity, DrivetrainState>,
    /// Fixed ticks the drivetrain systems have run.
    pub ticks: u64,
}

impl DrivetrainTelemetry {
    pub fn get(&self, vehicle: Entity) -> Option<&DrivetrainState> {
        self.states.get(&vehicle)
    }
}

/// Counts fixed ticks between periodic speed readouts.
#[derive(Resource, Default)]
pub struct SpeedReadoutTimer {
    pub counter: u32,
}

impl SpeedReadoutTimer {
    /// Log every 30 ticks (half a second at the default 60 Hz).
    pub const INTERVAL: u32 = 30;

    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}
