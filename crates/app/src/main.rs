use bevy::prelude::*;

use drivetrain::{DrivetrainConfig, Simulator};

mod agent_mode;
mod demo;

const USAGE: &str = "usage: drivetrain-sim [--agent] [--config <path.json>]";

fn main() -> AppExit {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return AppExit::Success;
    }

    let config = match config_path(&args) {
        Ok(Some(path)) => match DrivetrainConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load config {path}: {e}");
                return AppExit::error();
            }
        },
        Ok(None) => DrivetrainConfig::default(),
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return AppExit::error();
        }
    };

    if args.iter().any(|a| a == "--agent") {
        match Simulator::new(config) {
            Ok(sim) => agent_mode::run_agent_mode(sim),
            Err(e) => {
                eprintln!("invalid drivetrain config: {e}");
                return AppExit::error();
            }
        }
        return AppExit::Success;
    }

    demo::run_demo(config)
}

fn config_path(args: &[String]) -> Result<Option<&str>, String> {
    match args.iter().position(|a| a == "--config") {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|p| Some(p.as_str()))
            .ok_or_else(|| "--config needs a path".to_string()),
    }
}
