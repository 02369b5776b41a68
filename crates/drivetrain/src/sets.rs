//! Deterministic ordering of the drivetrain systems inside `FixedUpdate`.
//!
//! ```text
//! Input  →  Step  →  Report
//! ```
//!
//! * **Input** – host systems that write driver intents into
//!   [`crate::vehicles::IntentLatch`] for this tick.
//! * **Step** – one [`crate::simulator::Simulator::step`] per vehicle.
//! * **Report** – read-only consumers: telemetry snapshot, speed readout.
//!   They never mutate a simulator.

use bevy::prelude::*;

/// Ordered phases for drivetrain systems in the `FixedUpdate` schedule.
///
/// Configured as a chain by [`crate::DrivetrainPlugin`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DrivetrainSet {
    Input,
    Step,
    Report,
}
