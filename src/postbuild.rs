//! Post-build disk-image repackaging.
//!
//! The bundler's DMG carries the .app straight off the linker; shipping
//! builds re-pack it so the image contents can be amended (frameworks,
//! re-signing) before compression. The flow mirrors what a release engineer
//! does by hand:
//!
//! 1. attach the newest bundler-produced DMG shadow-mounted and unbrowsable,
//! 2. copy the mounted volume into the packaging root, keeping symlinks,
//! 3. detach the volume,
//! 4. compress the local copy into a fresh UDZO image.
//!
//! Only meaningful on macOS; on other platforms the phase logs and returns.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::bail;
use crate::checksum;
use crate::error::{Context, Error, ErrorExt, Result};
use crate::fsutil;
use crate::settings::{Platform, Settings};
use crate::tool::{self, ToolCommand, ToolRunner, detection};

/// Repackages the newest disk image the bundler produced.
///
/// # Errors
///
/// Returns [`Error::ArtifactMissing`] when the bundle directory holds no
/// disk image, and [`Error::ToolFailed`] when any `hdiutil` step exits
/// non-zero. A failure while copying out of the mounted volume still
/// detaches it before the error is reported; if that detach fails too, the
/// copy error stays primary and the detach failure is logged.
pub async fn repackage<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    if settings.platform() != Platform::MacOs {
        log::debug!("disk-image repackaging only applies to macOS, skipping");
        return Ok(());
    }
    if !*detection::HAS_HDIUTIL {
        log::warn!("hdiutil not detected; disk-image repackaging is likely to fail");
    }

    let dmg = newest_dmg(&settings.dmg_dir())?;
    log::info!("Repackaging {}", dmg.display());

    let mount_point = settings.mount_point();
    attach(runner, &dmg, mount_point).await?;

    // Detach even when the copy fails; a volume left mounted blocks reruns.
    let local_copy = settings.packaging_root().join(settings.product_name());
    let copied = copy_out(mount_point, &local_copy).await;
    let detached = detach(runner, mount_point).await;
    if let Err(e) = copied {
        if let Err(detach_err) = detached {
            log::warn!("detach after failed copy also failed: {detach_err}");
        }
        return Err(e);
    }
    detached?;

    let final_dmg = settings.final_dmg_path();
    if final_dmg.exists() {
        tokio::fs::remove_file(&final_dmg)
            .await
            .fs_context("removing old disk image", &final_dmg)?;
    }
    create(runner, &local_copy, &final_dmg, settings.product_name()).await?;

    if !final_dmg.exists() {
        bail!(
            "hdiutil reported success but {} is missing",
            final_dmg.display()
        );
    }
    let digest = checksum::sha256_file(&final_dmg).await?;
    log::info!("✓ Repackaged {} (sha256 {})", final_dmg.display(), digest);
    Ok(())
}

/// Finds the most recently modified disk image in a directory.
///
/// The bundler names images after the product and version, so after several
/// builds the directory holds a small pile of them; modification time picks
/// the one the build that just finished wrote.
pub fn newest_dmg(dir: &Path) -> Result<PathBuf> {
    let pattern = dir.join("*.dmg");
    let pattern = pattern
        .to_str()
        .context("disk image directory is not valid UTF-8")?
        .to_string();

    let entries = glob::glob(&pattern)
        .map_err(|e| Error::GenericError(format!("invalid pattern {pattern}: {e}")))?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for path in entries.flatten() {
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .fs_context("reading artifact metadata", &path)?;
        if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or(Error::ArtifactMissing { pattern })
}

async fn attach<R: ToolRunner>(runner: &R, dmg: &Path, mount_point: &Path) -> Result<()> {
    let command = ToolCommand::new("hdiutil")
        .args(["attach", "-shadow", "-nobrowse", "-mountpoint"])
        .arg(utf8(mount_point)?)
        .arg(utf8(dmg)?);
    let output = runner.run(&command).await?;
    tool::expect_success(&command, &output)?;

    if !mount_point.exists() {
        bail!(
            "mount point {} did not appear after attach",
            mount_point.display()
        );
    }
    log::debug!("attached {} at {}", dmg.display(), mount_point.display());
    Ok(())
}

async fn detach<R: ToolRunner>(runner: &R, mount_point: &Path) -> Result<()> {
    let command = ToolCommand::new("hdiutil")
        .arg("detach")
        .arg(utf8(mount_point)?);
    let output = runner.run(&command).await?;
    tool::expect_success(&command, &output)?;

    log::debug!("detached {}", mount_point.display());
    Ok(())
}

async fn create<R: ToolRunner>(
    runner: &R,
    src_folder: &Path,
    dmg: &Path,
    volume_name: &str,
) -> Result<()> {
    let command = ToolCommand::new("hdiutil")
        .args(["create", "-volname", volume_name, "-format", "UDZO"])
        .arg("-srcfolder")
        .arg(utf8(src_folder)?)
        .arg(utf8(dmg)?);
    let output = runner.run(&command).await?;
    tool::expect_success(&command, &output)
}

/// Copies the mounted volume into the packaging root, replacing any copy a
/// previous run left behind.
async fn copy_out(mount_point: &Path, local_copy: &Path) -> Result<()> {
    fsutil::remove_dir_all(local_copy).await?;
    fsutil::copy_tree(mount_point, local_copy).await
}

fn utf8(path: &Path) -> Result<&str> {
    path.to_str().context("path contains non-UTF8 characters")
}
