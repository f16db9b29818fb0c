//! Packaging build invocation.
//!
//! Runs `cargo tauri build` in the packaging root with the platform's
//! environment overrides. The Windows toolchain needs Node.js on PATH ahead
//! of anything else and an `OPENBLAS_PATH` pointing into the MinGW prefix;
//! the other platforms build in the inherited environment.

use crate::error::Result;
use crate::settings::{Platform, Settings};
use crate::tool::{self, ToolCommand, ToolRunner};

/// Directory prepended to PATH so the bundler finds the Node.js toolchain.
const NODEJS_DIR: &str = r"C:\Program Files\Nodejs";

/// Environment overrides for the packaging build.
///
/// Empty on macOS and Linux. On Windows, PATH is re-exported with the
/// Node.js directory prepended, and `OPENBLAS_PATH` is set from
/// `MINGW_PREFIX` when that is available.
pub fn build_environment(settings: &Settings) -> Vec<(String, String)> {
    let mut env = Vec::new();
    if settings.platform() != Platform::Windows {
        return env;
    }

    let path = std::env::var("PATH").unwrap_or_default();
    env.push(("PATH".to_string(), format!("{NODEJS_DIR};{path}")));

    match std::env::var("MINGW_PREFIX") {
        Ok(prefix) if !prefix.is_empty() => {
            env.push(("OPENBLAS_PATH".to_string(), prefix));
        }
        _ => log::warn!("MINGW_PREFIX is not set; OPENBLAS_PATH will not be exported"),
    }

    env
}

/// Runs `cargo tauri build` in the packaging root.
///
/// Skipped entirely when the settings say so; staging and manifest patching
/// still happen around a skipped build, which is how a broken cleanup is
/// reproduced without waiting for a full compile.
///
/// # Errors
///
/// Returns [`Error::ToolFailed`] with the exit code and captured stderr when
/// the build exits non-zero.
///
/// [`Error::ToolFailed`]: crate::error::Error::ToolFailed
pub async fn run_packaging_build<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    if settings.skip_build() {
        log::info!("Skipping the packaging build");
        return Ok(());
    }

    let command = ToolCommand::new("cargo")
        .args(["tauri", "build"])
        .envs(build_environment(settings))
        .current_dir(settings.packaging_root());

    log::info!("Running {}...", command.display_line());
    let output = runner.run(&command).await?;
    tool::expect_success(&command, &output)?;

    log::info!("✓ Packaging build finished");
    Ok(())
}
