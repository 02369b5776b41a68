//! # TestVehicle: headless integration test harness
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `DrivetrainPlugin` and a
//! single vehicle entity, with time advanced manually so every `tick()` runs
//! exactly one fixed update.

use std::time::Duration;

use bevy::app::App;
use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::DrivetrainConfig;
use crate::intents::DriveIntents;
use crate::simulator::ShiftOutcome;
use crate::state::DrivetrainState;
use crate::vehicles::{DrivetrainTelemetry, IgnitionEvent, IntentLatch, ShiftEvent, Vehicle};
use crate::DrivetrainPlugin;

/// Tick rate of the harness: 10 Hz, so one tick is 0.1 s.
pub const HARNESS_TICK_HZ: f64 = 10.0;

pub struct TestVehicle {
    app: App,
    vehicle: Entity,
    shift_cursor: EventCursor<ShiftEvent>,
    ignition_cursor: EventCursor<IgnitionEvent>,
    shifts: Vec<ShiftEvent>,
    ignitions: Vec<IgnitionEvent>,
}

impl Default for TestVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVehicle {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A parked vehicle on the stock gearbox.
    pub fn new() -> Self {
        Self::with_config(DrivetrainConfig::default())
    }

    pub fn with_config(config: DrivetrainConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DrivetrainPlugin {
            tick_hz: HARNESS_TICK_HZ,
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / HARNESS_TICK_HZ,
        )));

        // The first update only initialises the clocks; spawn afterwards so
        // the vehicle sees exactly one step per tick().
        app.update();

        let vehicle = Vehicle::new(config).expect("harness config must be valid");
        let vehicle = app
            .world_mut()
            .spawn((vehicle, IntentLatch::default(), Name::new("test vehicle")))
            .id();

        Self {
            app,
            vehicle,
            shift_cursor: EventCursor::default(),
            ignition_cursor: EventCursor::default(),
            shifts: Vec::new(),
            ignitions: Vec::new(),
        }
    }

    /// Spawn another vehicle in the same world.
    pub fn spawn_vehicle(&mut self, config: DrivetrainConfig) -> Entity {
        let vehicle = Vehicle::new(config).expect("harness config must be valid");
        self.app
            .world_mut()
            .spawn((vehicle, IntentLatch::default()))
            .id()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Latch intents for the primary vehicle's next step.
    pub fn press(&mut self, intents: DriveIntents) -> &mut Self {
        let vehicle = self.vehicle;
        self.press_for(vehicle, intents)
    }

    pub fn press_for(&mut self, vehicle: Entity, intents: DriveIntents) -> &mut Self {
        if let Some(mut latch) = self.app.world_mut().get_mut::<IntentLatch>(vehicle) {
            latch.press(intents);
        }
        self
    }

    pub fn hold_throttle(&mut self, held: bool) -> &mut Self {
        let vehicle = self.vehicle;
        if let Some(mut latch) = self.app.world_mut().get_mut::<IntentLatch>(vehicle) {
            latch.set_throttle(held);
        }
        self
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Run `n` fixed ticks and collect the events they produced.
    pub fn tick(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.update();
            self.drain_events();
        }
        self
    }

    fn drain_events(&mut self) {
        let world = self.app.world();
        let shifts = world.resource::<Events<ShiftEvent>>();
        self.shifts.extend(self.shift_cursor.read(shifts).copied());
        let ignitions = world.resource::<Events<IgnitionEvent>>();
        self.ignitions
            .extend(self.ignition_cursor.read(ignitions).copied());
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn vehicle(&self) -> Entity {
        self.vehicle
    }

    pub fn state(&self) -> DrivetrainState {
        self.state_of(self.vehicle)
    }

    pub fn state_of(&self, vehicle: Entity) -> DrivetrainState {
        self.app
            .world()
            .get::<Vehicle>(vehicle)
            .map(Vehicle::state)
            .expect("vehicle entity exists")
    }

    pub fn telemetry(&self) -> &DrivetrainTelemetry {
        self.app.world().resource::<DrivetrainTelemetry>()
    }

    /// Shift outcomes for the primary vehicle, oldest first.
    pub fn shift_outcomes(&self) -> Vec<ShiftOutcome> {
        self.shifts
            .iter()
            .filter(|e| e.vehicle == self.vehicle)
            .map(|e| e.outcome)
            .collect()
    }

    pub fn ignition_events(&self) -> &[IgnitionEvent] {
        &self.ignitions
    }
}
