//! gowheel - Compile Go CLI programs into Python wheels.
//!
//! This binary cross-compiles a Go module for a list of target platforms
//! and packages each binary into an installable Python wheel, with
//! per-platform failure tolerance and distinguishable exit codes.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and map the result onto the exit code contract
    let exit_code = match gowheel::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
