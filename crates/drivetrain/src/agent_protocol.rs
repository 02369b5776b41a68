//! Agent text protocol for the `--agent` headless mode.
//!
//! External programs (scripts, test rigs, tuning tools) drive a single
//! simulator over newline-delimited JSON on stdin/stdout. The command
//! dispatcher [`process_command`] is pure so it can be tested here; the I/O
//! loop lives in `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::config::DrivetrainConfig;
use crate::intents::DriveIntents;
use crate::simulator::{Simulator, StepReport};
use crate::state::DrivetrainState;

// ---------------------------------------------------------------------------
// Commands (stdin → simulator)
// ---------------------------------------------------------------------------

/// A single command sent by the external agent over stdin.
///
/// The `cmd` field acts as the discriminator tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Advance the simulator by `dt` seconds with the given intents.
    /// Missing intent flags default to `false`.
    #[serde(rename = "step")]
    Step {
        #[serde(default)]
        intents: DriveIntents,
        dt: f32,
    },

    /// Report the current state without stepping.
    #[serde(rename = "observe")]
    Observe,

    /// Back to parked with the current config.
    #[serde(rename = "reset")]
    Reset,

    /// Replace the config and restart parked. The old simulator is kept if
    /// the new config is invalid.
    #[serde(rename = "configure")]
    Configure { config: DrivetrainConfig },

    /// Gracefully shut down the agent session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (simulator → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

/// Tagged payload variants for agent responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready { state: DrivetrainState },

    #[serde(rename = "state")]
    State { state: DrivetrainState },

    /// Result of a `step` command.
    #[serde(rename = "stepped")]
    Stepped {
        state: DrivetrainState,
        report: StepReport,
    },

    #[serde(rename = "error")]
    Error { message: String },

    /// The session is ending (response to `quit`).
    #[serde(rename = "goodbye")]
    Goodbye,
}

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Wrap a payload with the current protocol version.
pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Apply one command to the simulator and build the reply.
pub fn process_command(sim: &mut Simulator, cmd: AgentCommand) -> AgentResponse {
    let payload = match cmd {
        AgentCommand::Step { intents, dt } => match sim.step(intents, dt) {
            Ok(report) => ResponsePayload::Stepped {
                state: sim.state(),
                report,
            },
            Err(e) => ResponsePayload::Error {
                message: e.to_string(),
            },
        },
        AgentCommand::Observe => ResponsePayload::State { state: sim.state() },
        AgentCommand::Reset => {
            sim.reset();
            ResponsePayload::State { state: sim.state() }
        }
        AgentCommand::Configure { config } => match Simulator::new(config) {
            Ok(fresh) => {
                *sim = fresh;
                ResponsePayload::State { state: sim.state() }
            }
            Err(e) => ResponsePayload::Error {
                message: e.to_string(),
            },
        },
        AgentCommand::Quit => ResponsePayload::Goodbye,
    };
    make_response(payload)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
