//! Target platform selection.

use std::fmt;

use crate::error::{Error, Result};

/// Platforms the harness knows how to stage and patch for.
///
/// The platform decides which resources are staged by default, which part of
/// the manifest gets patched, and which library directories are searched when
/// a resource is given by name rather than by path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    /// Windows desktop builds (MSI/NSIS bundles)
    Windows,
    /// macOS desktop builds (.app/.dmg bundles)
    MacOs,
    /// Linux desktop builds (deb/AppImage bundles)
    Linux,
}

impl Platform {
    /// Names accepted by [`Platform::parse`], in display order.
    pub const NAMES: [&'static str; 3] = ["windows", "macos", "linux"];

    /// Returns the platform the harness is currently running on.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Parses a platform name as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] listing the accepted names.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(Error::InvalidArguments {
                reason: format!(
                    "Invalid platform: {}. Valid platforms: {}",
                    other,
                    Self::NAMES.join(", ")
                ),
            }),
        }
    }

    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
