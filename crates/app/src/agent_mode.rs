//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`drivetrain::agent_protocol`] for the full schema.

use std::io::{BufRead, Write};

use drivetrain::agent_protocol::{
    make_response, process_command, AgentCommand, AgentResponse, ResponsePayload, PROTOCOL_VERSION,
};
use drivetrain::Simulator;

pub fn run_agent_mode(mut sim: Simulator) {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    // Send the "ready" message so the external program knows we are live.
    write_response(
        &mut stdout,
        &make_response(ResponsePayload::Ready { state: sim.state() }),
    );

    // Log to stderr so it does not interfere with the JSON protocol on stdout.
    eprintln!(
        "drivetrain agent mode v{} ready, waiting for commands on stdin",
        PROTOCOL_VERSION
    );

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let cmd: AgentCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                let resp = make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                });
                write_response(&mut stdout, &resp);
                continue;
            }
        };

        let response = process_command(&mut sim, cmd);
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    eprintln!("drivetrain agent mode shutting down");
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => eprintln!("failed to encode response: {e}"),
    }
}
