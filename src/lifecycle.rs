//! The staged-build lifecycle.
//!
//! A run is acquire/build/release: staging and manifest patching acquire the
//! workspace, the packaging build runs in the patched state, and the release
//! puts everything back whether the build succeeded or not. The release is
//! carried by [`StagedWorkspace`], a guard whose `Drop` restores the
//! workspace if a panic gets past the explicit paths.

use crate::error::Result;
use crate::settings::Settings;
use crate::stage::{self, StagedFile};
use crate::tool::{ToolRunner, detection};
use crate::{invoke, manifest, postbuild};

/// Guard over a staged-and-patched packaging root.
///
/// Constructed by [`StagedWorkspace::acquire`], which stages the configured
/// resources and patches the manifest. Consumed by
/// [`StagedWorkspace::restore`], which removes the staged copies and moves
/// the manifest backup back. When the settings say to skip cleanup, the
/// guard is created disarmed and restore leaves the workspace as the build
/// used it.
pub struct StagedWorkspace<'a> {
    settings: &'a Settings,
    staged: Vec<StagedFile>,
    armed: bool,
}

impl<'a> StagedWorkspace<'a> {
    /// Stages resources and patches the manifest.
    ///
    /// The manifest is only touched once every copy has landed, so a staging
    /// failure never leaves a patched manifest behind. Copies staged before
    /// the failure do stay behind; a later `--clean-only` run sweeps them.
    pub async fn acquire(settings: &'a Settings) -> Result<StagedWorkspace<'a>> {
        let staged = stage::stage_resources(settings).await?;
        manifest::patch(settings, &staged).await?;
        Ok(Self {
            settings,
            staged,
            armed: !settings.skip_cleanup(),
        })
    }

    /// The staging record for this run.
    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    /// Removes the staged copies and restores the manifest.
    pub fn restore(mut self) -> Result<()> {
        if !self.armed {
            log::info!("Skipping cleanup, leaving staged resources and patched manifest in place");
            return Ok(());
        }
        self.armed = false;
        release(self.settings, &self.staged)
    }
}

impl Drop for StagedWorkspace<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = release(self.settings, &self.staged) {
            log::warn!("cleanup after interrupted run failed: {e}");
        }
    }
}

fn release(settings: &Settings, staged: &[StagedFile]) -> Result<()> {
    stage::remove_staged(staged)?;
    manifest::restore(settings)
}

/// Runs the full lifecycle: stage, patch, build, repackage, restore.
///
/// The restore runs on both the success and the failure path; a build
/// failure is reported after the workspace has been put back. When cleanup
/// itself fails on the failure path, the build error stays the primary one
/// and the cleanup error is logged.
pub async fn run_build<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    if !settings.skip_build() && !*detection::HAS_TAURI_CLI {
        log::warn!("tauri CLI not detected; `cargo tauri build` is likely to fail");
    }

    let workspace = StagedWorkspace::acquire(settings).await?;

    match run_phases(settings, runner).await {
        Ok(()) => workspace.restore(),
        Err(e) => {
            if let Err(cleanup) = workspace.restore() {
                log::warn!("cleanup after failed build also failed: {cleanup}");
            }
            Err(e)
        }
    }
}

/// Removes staged copies and restores the manifest without building.
///
/// The recovery entry point after an interrupted or `--skip-cleanup` run:
/// staged names are derived from the configured resource list, and the
/// manifest comes back from its backup.
pub fn clean_only(settings: &Settings) -> Result<()> {
    stage::remove_expected(settings)?;
    manifest::restore(settings)?;
    log::info!("✓ Cleaned {}", settings.packaging_root().display());
    Ok(())
}

async fn run_phases<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    invoke::run_packaging_build(settings, runner).await?;
    if settings.post_build() {
        postbuild::repackage(settings, runner).await?;
    }
    Ok(())
}
