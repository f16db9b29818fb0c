//! Configuration for a staged packaging run.
//!
//! This module provides the settings types the rest of the harness runs on:
//! the target [`Platform`], the resource list to stage, and the [`Settings`]
//! struct constructed through [`SettingsBuilder`]. Nothing in here touches the
//! file system; paths are resolved lazily by the phases that use them.

mod builder;
mod core;
mod platform;
mod resources;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use platform::Platform;
pub use resources::{ResourceSpec, default_resources};
