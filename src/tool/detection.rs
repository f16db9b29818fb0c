//! External tool detection and availability checking.
//!
//! The packaging build needs the Tauri CLI reachable as `cargo tauri`; the
//! disk-image phase needs `hdiutil`. Detection is advisory: a missing tool is
//! logged up front so the eventual failure is not a mystery, but the run is
//! not aborted here.

use std::sync::LazyLock;

/// Check if the Tauri CLI is reachable as `cargo tauri`.
///
/// Cached result to avoid repeated subprocess calls during a run.
pub static HAS_TAURI_CLI: LazyLock<bool> = LazyLock::new(|| match which::which("cargo") {
    Ok(path) => {
        log::debug!("Found cargo at: {}", path.display());

        match std::process::Command::new(&path)
            .args(["tauri", "--version"])
            .output()
        {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::info!("✓ tauri CLI available: {}", version.trim());
                true
            }
            Ok(output) => {
                log::warn!(
                    "cargo found at {} but `cargo tauri --version` failed (exit code: {:?}). \
                         Install tauri-cli before building. \
                         Stderr: {}",
                    path.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "cargo found at {} but failed to execute: {}. \
                         Check file permissions.",
                    path.display(),
                    e
                );
                false
            }
        }
    }
    Err(e) => {
        log::debug!(
            "cargo not found in PATH: {}. The packaging build will fail.",
            e
        );
        false
    }
});

/// Check if hdiutil is available for disk-image repackaging.
///
/// Cached result to avoid repeated subprocess calls during a run.
pub static HAS_HDIUTIL: LazyLock<bool> = LazyLock::new(|| match which::which("hdiutil") {
    Ok(path) => {
        log::debug!("Found hdiutil at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!(
            "hdiutil not found in PATH: {}. Disk-image repackaging will fail.",
            e
        );
        false
    }
});
