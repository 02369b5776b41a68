//! Discrete-time engine and gearbox model.
//!
//! [`Simulator::step`] advances one vehicle by an explicit `dt` in a fixed
//! order:
//!
//! ```text
//! ignition  →  rpm integration  →  gear shift  →  speed derivation
//! ```
//!
//! Every phase leaves `rpm` inside its bounds, so the invariants hold after
//! each step regardless of which intents were set.

mod engine;
mod gearbox;
mod speed;
mod types;

pub use gearbox::projected_rpm_after_downshift;
pub use types::{IgnitionChange, ShiftDirection, ShiftOutcome, ShiftRejection, StepReport};

use crate::config::DrivetrainConfig;
use crate::error::{ConfigError, StepError};
use crate::intents::DriveIntents;
use crate::state::DrivetrainState;

/// One vehicle's drivetrain: a validated config plus the state it owns.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: DrivetrainConfig,
    state: DrivetrainState,
}

impl Default for Simulator {
    /// Parked simulator on the stock gearbox. The default config always
    /// passes validation.
    fn default() -> Self {
        Self {
            config: DrivetrainConfig::default(),
            state: DrivetrainState::PARKED,
        }
    }
}

impl Simulator {
    /// Validate `config` and start parked: engine off, neutral, 0 rpm.
    pub fn new(config: DrivetrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: DrivetrainState::PARKED,
        })
    }

    /// Advance the drivetrain by `dt` seconds.
    ///
    /// A negative or non-finite `dt` is rejected before anything changes.
    /// Gear requests that cannot be honoured are reported in the returned
    /// [`StepReport`], not as errors.
    pub fn step(&mut self, intents: DriveIntents, dt: f32) -> Result<StepReport, StepError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(StepError::InvalidArgument { dt });
        }

        let config = &self.config;
        let state = &mut self.state;

        let ignition = engine::apply_ignition(state, config, &intents);
        engine::integrate_rpm(state, config, intents.throttle, dt);
        let shift = gearbox::evaluate_shift(state, config, &intents);
        state.speed_kmh = speed::road_speed_kmh(state, config);

        Ok(StepReport { ignition, shift })
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> DrivetrainState {
        self.state
    }

    pub fn config(&self) -> &DrivetrainConfig {
        &self.config
    }

    /// Back to parked, keeping the config.
    pub fn reset(&mut self) {
        self.state = DrivetrainState::PARKED;
    }
}
