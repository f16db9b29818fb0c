//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Staging harness around the Tauri packaging build
#[derive(Parser, Debug)]
#[command(
    name = "stagehand",
    version,
    about = "Stages native libraries and patches tauri.conf.json around `cargo tauri build`",
    long_about = "Prepares a Tauri packaging directory, runs the packaging build, and puts the directory back.

Before the build, the platform's shared libraries are copied next to tauri.conf.json and the manifest is patched to reference them (Windows) or to ad-hoc sign the release binary (macOS). The original manifest is kept as tauri.conf.old.json. After the build, staged copies are removed and the manifest is restored, whether the build succeeded or not.

Usage:
  stagehand -C desktop/src-tauri
  stagehand -C desktop/src-tauri --platform windows --skip-build
  stagehand -C desktop/src-tauri --post-build
  stagehand -C desktop/src-tauri --clean-only

Exit code 0 = the packaging root is back in its pre-run state (unless --skip-cleanup)."
)]
pub struct Args {
    /// Packaging directory containing tauri.conf.json
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub packaging_root: PathBuf,

    /// Platform to stage for: windows, macos, linux (defaults to the host)
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Product name (defaults to package.productName from the manifest)
    #[arg(long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// Release binary name (defaults to the product name)
    #[arg(long, value_name = "NAME")]
    pub binary_name: Option<String>,

    /// Release directory the packaging build writes into
    #[arg(long, value_name = "DIR")]
    pub release_dir: Option<PathBuf>,

    /// Mount point used while repackaging the disk image
    #[arg(long, value_name = "DIR")]
    pub mount_point: Option<PathBuf>,

    /// Extra resource staged in addition to the platform defaults.
    ///
    /// A bare name is resolved through the system library search path;
    /// anything with a path separator is taken relative to the packaging
    /// root. May be given multiple times.
    #[arg(long = "resource", value_name = "SPEC")]
    pub resources: Vec<String>,

    /// Do not invoke the packaging build (also: SKIP_BUILD=1)
    #[arg(long)]
    pub skip_build: bool,

    /// Leave staged resources and the patched manifest in place (also: SKIP_CLEANUP=1)
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Repackage the produced disk image after the build (also: POST_BUILD=1)
    #[arg(long)]
    pub post_build: bool,

    /// Only remove staged resources and restore the manifest, then exit
    #[arg(long)]
    pub clean_only: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(platform) = &self.platform {
            let valid_platforms = crate::settings::Platform::NAMES;
            if !valid_platforms.contains(&platform.as_str()) {
                return Err(format!(
                    "Invalid platform: {}. Valid platforms: {}",
                    platform,
                    valid_platforms.join(", ")
                ));
            }
        }

        if self.clean_only && self.skip_cleanup {
            return Err("--clean-only conflicts with --skip-cleanup".to_string());
        }

        Ok(())
    }

    /// Whether the packaging build is skipped, from the flag or `SKIP_BUILD=1`.
    pub fn skip_build(&self) -> bool {
        self.skip_build || env_flag("SKIP_BUILD")
    }

    /// Whether cleanup is skipped, from the flag or `SKIP_CLEANUP=1`.
    pub fn skip_cleanup(&self) -> bool {
        self.skip_cleanup || env_flag("SKIP_CLEANUP")
    }

    /// Whether the disk image is repackaged, from the flag or `POST_BUILD=1`.
    pub fn post_build(&self) -> bool {
        self.post_build || env_flag("POST_BUILD")
    }
}

/// A flag variable is enabled by the literal `1`, nothing else.
fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|value| value == "1").unwrap_or(false)
}
