//! pulse - project schedule and health diagnosis CLI

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pulse_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
