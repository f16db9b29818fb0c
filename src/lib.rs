//! Staging harness around the Tauri packaging build.
//!
//! This library prepares a Tauri packaging directory before
//! `cargo tauri build` runs and puts it back afterwards:
//! - stages platform-specific shared libraries next to `tauri.conf.json`,
//! - patches the manifest to reference them (Windows) or to inject an
//!   ad-hoc signing hook (macOS), keeping a backup of the original,
//! - invokes the packaging build with the platform's environment overrides,
//! - optionally repackages the produced disk image,
//! - restores the manifest and removes staged copies, on success and on
//!   failure alike.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod checksum;
pub mod cli;
pub mod error;
pub mod fsutil;
pub mod invoke;
pub mod lifecycle;
pub mod manifest;
pub mod postbuild;
pub mod settings;
pub mod stage;
pub mod tool;

// Re-export commonly used types
pub use error::{Error, Result};
pub use settings::{Platform, ResourceSpec, Settings, SettingsBuilder};
pub use tool::{ProcessRunner, ToolCommand, ToolOutput, ToolRunner};
