//! Integration tests for the ECS host layer using the `TestVehicle` harness.
//!
//! These run a headless Bevy App with `DrivetrainPlugin` at 10 Hz, so each
//! `tick(1)` is one 0.1 s step.

use crate::config::DrivetrainConfig;
use crate::intents::DriveIntents;
use crate::simulator::{IgnitionChange, ShiftDirection, ShiftOutcome, ShiftRejection, Simulator};
use crate::state::{DrivetrainState, EngineMode};
use crate::test_harness::TestVehicle;

const EPSILON: f32 = 1e-2;

// ===========================================================================
// 1. Harness bootstrap
// ===========================================================================

#[test]
fn vehicle_starts_parked() {
    let mut car = TestVehicle::new();
    assert_eq!(car.state(), DrivetrainState::PARKED);
    car.tick(5);
    assert_eq!(
        car.state(),
        DrivetrainState::PARKED,
        "nothing happens without input"
    );
}

#[test]
fn each_tick_is_one_tenth_of_a_second() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.hold_throttle(true).tick(1);
    // Neutral revs at half rate: 800 + 1000 * 0.1
    assert!(
        (car.state().rpm - 900.0).abs() < EPSILON,
        "rpm {}",
        car.state().rpm
    );
}

// ===========================================================================
// 2. Intent latching
// ===========================================================================

#[test]
fn ignition_pulse_starts_engine_once() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(3);

    assert_eq!(car.state().mode(), EngineMode::Idle);
    assert_eq!(car.state().rpm, 800.0);
    assert_eq!(car.ignition_events().len(), 1);
    assert_eq!(car.ignition_events()[0].change, IgnitionChange::Started);
    assert_eq!(car.ignition_events()[0].vehicle, car.vehicle());
}

#[test]
fn shift_pulse_is_consumed_by_a_single_step() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.press(DriveIntents::shift_up()).tick(4);

    assert_eq!(car.state().gear, 1, "one press, one gear");
    assert_eq!(
        car.shift_outcomes(),
        vec![ShiftOutcome::Upshift { from: 0, to: 1 }]
    );
}

#[test]
fn held_throttle_persists_across_ticks() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.press(DriveIntents::shift_up()).tick(1);
    car.hold_throttle(true).tick(10);

    // 1 s of throttle in first gear from idle.
    assert!(
        (car.state().rpm - 2800.0).abs() < 1.0,
        "rpm {}",
        car.state().rpm
    );
    assert!((car.state().speed_kmh - 26.66).abs() < 0.1);

    car.hold_throttle(false).tick(2);
    assert!(
        (car.state().rpm - 2500.0).abs() < 1.0,
        "rpm {}",
        car.state().rpm
    );
}

// ===========================================================================
// 3. Driving behaviour through the plugin
// ===========================================================================

#[test]
fn early_upshift_is_reported_as_rejected() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.press(DriveIntents::shift_up()).tick(1);
    car.press(DriveIntents::shift_up()).tick(1);

    assert_eq!(car.state().gear, 1);
    assert_eq!(
        car.shift_outcomes().last(),
        Some(&ShiftOutcome::Rejected {
            direction: ShiftDirection::Up,
            reason: ShiftRejection::InsufficientRpm,
        })
    );
}

#[test]
fn launch_and_upshift_to_second() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.press(DriveIntents::shift_up()).tick(1);
    car.hold_throttle(true).tick(10);
    let before = car.state();
    assert!(before.rpm >= 2500.0);

    car.press(DriveIntents::shift_up()).tick(1);
    let after = car.state();
    assert_eq!(after.gear, 2);
    // One more throttle tick (+200) then the 0.6 factor.
    assert!((after.rpm - (before.rpm + 200.0) * 0.6).abs() < 1.0);
}

#[test]
fn stopping_engine_spins_down_and_zeroes_speed() {
    let mut car = TestVehicle::new();
    car.press(DriveIntents::ignition_start()).tick(1);
    car.press(DriveIntents::shift_up()).tick(1);
    car.hold_throttle(true).tick(5);
    assert!(car.state().speed_kmh > 0.0);

    car.hold_throttle(false)
        .press(DriveIntents::ignition_stop())
        .tick(1);
    let state = car.state();
    assert!(!state.ignition_on);
    assert_eq!(state.speed_kmh, 0.0);
    assert!(state.rpm < 1800.0);

    car.tick(30);
    assert_eq!(car.state().rpm, 0.0);
    assert_eq!(
        car.ignition_events().last().map(|e| e.change),
        Some(IgnitionChange::Stopped)
    );
}

#[test]
fn custom_config_is_respected() {
    let config = DrivetrainConfig {
        min_rpm: 1000.0,
        max_rpm: 3000.0,
        ..Default::default()
    };
    let mut car = TestVehicle::with_config(config);
    car.press(DriveIntents::ignition_start()).tick(1);
    assert_eq!(car.state().rpm, 1000.0);

    car.press(DriveIntents::shift_up()).tick(1);
    car.hold_throttle(true).tick(50);
    assert_eq!(car.state().rpm, 3000.0);
}

// ===========================================================================
// 4. Multiple vehicles
// ===========================================================================

#[test]
fn vehicles_are_independent() {
    let mut car = TestVehicle::new();
    let other = car.spawn_vehicle(DrivetrainConfig::default());

    car.press(DriveIntents::ignition_start()).tick(1);
    assert!(car.state().ignition_on);
    assert!(
        !car.state_of(other).ignition_on,
        "other vehicle got no input"
    );

    car.press_for(other, DriveIntents::ignition_start()).tick(1);
    car.press_for(other, DriveIntents::shift_up()).tick(1);
    assert_eq!(car.state_of(other).gear, 1);
    assert_eq!(car.state().gear, 0);
}

#[test]
fn ecs_matches_direct_simulation() {
    let mut car = TestVehicle::new();
    let mut sim = Simulator::default();
    let script = [
        DriveIntents::ignition_start(),
        DriveIntents::shift_up(),
        DriveIntents::throttle(),
        DriveIntents::throttle(),
        DriveIntents::shift_up().with_throttle(true),
        DriveIntents::IDLE,
        DriveIntents::shift_down(),
    ];

    for intents in script {
        car.press(intents).hold_throttle(intents.throttle).tick(1);
        sim.step(intents, 0.1).unwrap();
        let ecs = car.state();
        let direct = sim.state();
        assert_eq!(ecs.gear, direct.gear);
        assert_eq!(ecs.ignition_on, direct.ignition_on);
        assert!((ecs.rpm - direct.rpm).abs() < EPSILON);
    }
}

// ===========================================================================
// 5. Telemetry
// ===========================================================================

#[test]
fn telemetry_tracks_every_vehicle() {
    let mut car = TestVehicle::new();
    let other = car.spawn_vehicle(DrivetrainConfig::default());
    let ticks_before = car.telemetry().ticks;
    car.press(DriveIntents::ignition_start()).tick(3);

    let telemetry = car.telemetry();
    assert_eq!(telemetry.ticks - ticks_before, 3);
    assert_eq!(telemetry.states.len(), 2);
    assert_eq!(
        telemetry.get(car.vehicle()).map(|s| s.ignition_on),
        Some(true)
    );
    assert_eq!(telemetry.get(other), Some(&DrivetrainState::PARKED));
}
