//! Scripted headless demo: one vehicle starts, launches in first gear, runs
//! up through the box at a fixed shift point, then lifts off and switches
//! the engine off. The speed readout and shift events go to the log.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use drivetrain::vehicles::{IntentLatch, ShiftEvent, Vehicle};
use drivetrain::{
    DriveIntents, DrivetrainConfig, DrivetrainPlugin, DrivetrainSet, DEFAULT_TICK_HZ,
};

/// rpm at which the script requests the next gear.
const SHIFT_POINT_RPM: f32 = 5500.0;
/// Fixed ticks of full throttle before lifting off.
const THROTTLE_TICKS: u32 = 20 * DEFAULT_TICK_HZ as u32;
/// Fixed ticks from ignition off until the demo exits.
const SPIN_DOWN_TICKS: u32 = 3 * DEFAULT_TICK_HZ as u32;

#[derive(Resource, Default)]
struct DemoScript {
    tick: u32,
}

pub fn run_demo(config: DrivetrainConfig) -> AppExit {
    let vehicle = match Vehicle::new(config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("invalid drivetrain config: {e}");
            return AppExit::error();
        }
    };

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / DEFAULT_TICK_HZ,
        ))),
    )
    .add_plugins(LogPlugin {
        filter: "info,drivetrain=debug".to_string(),
        ..default()
    })
    .add_plugins(DrivetrainPlugin::default())
    .init_resource::<DemoScript>()
    .add_systems(FixedUpdate, drive_script.in_set(DrivetrainSet::Input))
    .add_systems(Update, announce_shifts);

    app.world_mut().spawn((vehicle, IntentLatch::default(), Name::new("demo car")));

    app.run()
}

fn drive_script(
    mut script: ResMut<DemoScript>,
    mut vehicles: Query<(&Vehicle, &mut IntentLatch)>,
    mut exit: EventWriter<AppExit>,
) {
    let tick = script.tick;
    script.tick += 1;

    for (vehicle, mut latch) in &mut vehicles {
        let state = vehicle.state();
        let last_gear = vehicle.simulator().config().last_gear();

        match tick {
            0 => latch.press(DriveIntents::ignition_start()),
            1 => latch.press(DriveIntents::shift_up()),
            t if t < THROTTLE_TICKS => {
                latch.set_throttle(true);
                if state.rpm >= SHIFT_POINT_RPM && state.gear < last_gear {
                    latch.press(DriveIntents::shift_up());
                }
            }
            t if t == THROTTLE_TICKS => {
                latch.set_throttle(false);
                latch.press(DriveIntents::ignition_stop());
            }
            t if t >= THROTTLE_TICKS + SPIN_DOWN_TICKS => {
                info!("demo finished: {:.0} rpm, gear {}", state.rpm, state.gear);
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

fn announce_shifts(mut events: EventReader<ShiftEvent>) {
    for event in events.read() {
        if event.outcome.is_shift() {
            info!("{:?}", event.outcome);
        }
    }
}
