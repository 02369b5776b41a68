mod plugin;
mod systems;
mod types;

pub use plugin::VehiclesPlugin;
pub use systems::{log_speed_readout, record_telemetry, step_vehicles};
pub use types::{
    DrivetrainTelemetry, IgnitionEvent, IntentLatch, ShiftEvent, SpeedReadoutTimer, Vehicle,
};
