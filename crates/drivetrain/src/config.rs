//! Drivetrain tunables.
//!
//! [`DrivetrainConfig`] gathers every constant the engine and gearbox model
//! reads. It is built once, validated, and then shared read-only by the
//! simulator. The serde derive with `#[serde(default)]` lets a JSON file
//! override only the fields it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Engine idle speed.
pub const DEFAULT_MIN_RPM: f32 = 800.0;
/// Rev limiter.
pub const DEFAULT_MAX_RPM: f32 = 7000.0;
/// rpm/second gained with throttle held in gear.
pub const DEFAULT_RPM_INCREASE_RATE: f32 = 2000.0;
/// rpm/second lost without throttle in gear.
pub const DEFAULT_RPM_DECREASE_RATE: f32 = 1500.0;
/// rpm/second lost while the engine spins down after ignition off.
pub const DEFAULT_RPM_DECREASE_RATE_IGNITION_OFF: f32 = 800.0;
pub const DEFAULT_DIFFERENTIAL_RATIO: f32 = 3.42;
pub const DEFAULT_WHEEL_RADIUS_METERS: f32 = 0.33;
pub const DEFAULT_MIN_RPM_FOR_UPSHIFT: f32 = 2500.0;
pub const DEFAULT_MAX_RPM_FOR_DOWNSHIFT: f32 = 1000.0;
/// Engine speed multiplier applied after a successful upshift.
pub const DEFAULT_SHIFT_UP_RPM_FACTOR: f32 = 0.6;
/// Engine speed multiplier applied after a downshift into a forward gear.
pub const DEFAULT_SHIFT_DOWN_RPM_FACTOR: f32 = 1.4;
/// Neutral followed by six forward gears.
pub const DEFAULT_GEAR_RATIOS: [f32; 7] = [0.0, 3.82, 2.20, 1.52, 1.22, 1.02, 0.84];

/// Share of the in-gear rates applied while in neutral.
pub const NEUTRAL_THROTTLE_SCALE: f32 = 0.5;
pub const NEUTRAL_COAST_SCALE: f32 = 0.2;

/// Immutable engine and transmission parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivetrainConfig {
    pub min_rpm: f32,
    pub max_rpm: f32,
    pub rpm_increase_rate: f32,
    pub rpm_decrease_rate: f32,
    pub rpm_decrease_rate_ignition_off: f32,
    /// Index 0 is neutral and its value is never read. Indices 1..N are the
    /// forward gears, first gear having the largest ratio.
    pub gear_ratios: Vec<f32>,
    pub differential_ratio: f32,
    pub wheel_radius_meters: f32,
    pub min_rpm_for_upshift: f32,
    pub max_rpm_for_downshift: f32,
    pub shift_up_rpm_factor: f32,
    pub shift_down_rpm_factor: f32,
}

impl Default for DrivetrainConfig {
    fn default() -> Self {
        Self {
            min_rpm: DEFAULT_MIN_RPM,
            max_rpm: DEFAULT_MAX_RPM,
            rpm_increase_rate: DEFAULT_RPM_INCREASE_RATE,
            rpm_decrease_rate: DEFAULT_RPM_DECREASE_RATE,
            rpm_decrease_rate_ignition_off: DEFAULT_RPM_DECREASE_RATE_IGNITION_OFF,
            gear_ratios: DEFAULT_GEAR_RATIOS.to_vec(),
            differential_ratio: DEFAULT_DIFFERENTIAL_RATIO,
            wheel_radius_meters: DEFAULT_WHEEL_RADIUS_METERS,
            min_rpm_for_upshift: DEFAULT_MIN_RPM_FOR_UPSHIFT,
            max_rpm_for_downshift: DEFAULT_MAX_RPM_FOR_DOWNSHIFT,
            shift_up_rpm_factor: DEFAULT_SHIFT_UP_RPM_FACTOR,
            shift_down_rpm_factor: DEFAULT_SHIFT_DOWN_RPM_FACTOR,
        }
    }
}

impl DrivetrainConfig {
    /// Index of the highest forward gear.
    pub fn last_gear(&self) -> usize {
        self.gear_ratios.len().saturating_sub(1)
    }

    /// Check the structural constraints the simulator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gear_ratios.len() < 2 {
            return Err(ConfigError::TooFewGears {
                found: self.gear_ratios.len(),
            });
        }

        // min_rpm may be zero (an engine with no idle floor), so it is only
        // checked for finiteness and sign here.
        finite("min_rpm", self.min_rpm)?;
        if self.min_rpm < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "min_rpm",
                value: self.min_rpm,
            });
        }
        finite("min_rpm_for_upshift", self.min_rpm_for_upshift)?;
        finite("max_rpm_for_downshift", self.max_rpm_for_downshift)?;

        let positive_fields = [
            ("max_rpm", self.max_rpm),
            ("rpm_increase_rate", self.rpm_increase_rate),
            ("rpm_decrease_rate", self.rpm_decrease_rate),
            (
                "rpm_decrease_rate_ignition_off",
                self.rpm_decrease_rate_ignition_off,
            ),
            ("differential_ratio", self.differential_ratio),
            ("wheel_radius_meters", self.wheel_radius_meters),
            ("shift_up_rpm_factor", self.shift_up_rpm_factor),
            ("shift_down_rpm_factor", self.shift_down_rpm_factor),
        ];
        for (field, value) in positive_fields {
            positive(field, value)?;
        }

        for &ratio in &self.gear_ratios[1..] {
            positive("gear_ratios", ratio)?;
        }

        if self.min_rpm >= self.max_rpm {
            return Err(ConfigError::InvertedRpmBounds {
                min: self.min_rpm,
                max: self.max_rpm,
            });
        }

        Ok(())
    }

    /// Parse a JSON document and validate the result.
    ///
    /// Fields missing from the document keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
