use bevy::prelude::*;

pub mod agent_protocol;
pub mod config;
pub mod error;
pub mod intents;
pub mod sets;
pub mod simulator;
pub mod state;
pub mod vehicles;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use config::DrivetrainConfig;
pub use error::{ConfigError, StepError};
pub use intents::DriveIntents;
pub use sets::DrivetrainSet;
pub use simulator::{Simulator, StepReport};
pub use state::{DrivetrainState, EngineMode};

/// Fixed simulation rate used when the host does not pick one.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Runs one [`Simulator`] per [`vehicles::Vehicle`] entity on the fixed
/// timestep.
///
/// Spawn `(Vehicle::new(config)?, IntentLatch::default())` and write driver
/// input into the latch; the plugin steps every vehicle once per fixed tick.
pub struct DrivetrainPlugin {
    pub tick_hz: f64,
}

impl Default for DrivetrainPlugin {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl Plugin for DrivetrainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.tick_hz))
            .configure_sets(
                FixedUpdate,
                (
                    DrivetrainSet::Input,
                    DrivetrainSet::Step,
                    DrivetrainSet::Report,
                )
                    .chain(),
            );

        app.add_plugins(vehicles::VehiclesPlugin);
    }
}
