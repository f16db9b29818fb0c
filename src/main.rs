//! stagehand - staging harness around the Tauri packaging build.
//!
//! This binary stages platform-specific shared libraries, patches
//! tauri.conf.json for the target platform, runs `cargo tauri build`, and
//! restores the packaging directory afterwards.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match stagehand::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
