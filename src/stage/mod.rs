//! Resource staging into the packaging root.
//!
//! Every resource entry is resolved to a source file, copied into the
//! packaging root under its base name, and verified against its source by
//! checksum. The returned staging record is what cleanup later removes, so
//! the bundler manifest can reference the copies by bare file name.

pub mod lookup;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::bail;
use crate::checksum;
use crate::error::{Error, ErrorExt, Result};
use crate::settings::{ResourceSpec, Settings};

/// Record of one staged resource copy.
#[derive(Clone, Debug)]
pub struct StagedFile {
    /// Where the resource was resolved from.
    pub source: PathBuf,
    /// The copy inside the packaging root.
    pub dest: PathBuf,
}

impl StagedFile {
    /// Base name of the staged copy, as the manifest references it.
    pub fn dest_name(&self) -> Option<&str> {
        self.dest.file_name().and_then(|name| name.to_str())
    }
}

/// Stages every configured resource into the packaging root.
///
/// Path entries resolve relative to the packaging root; name entries resolve
/// through the system library search path. Each copy follows symlinks, takes
/// the source's base name, and is checksum-verified afterwards.
///
/// Stops at the first failure. Files staged before the failure are left in
/// place; callers that need a clean tree run the removal themselves.
pub async fn stage_resources(settings: &Settings) -> Result<Vec<StagedFile>> {
    let mut staged = Vec::with_capacity(settings.resources().len());

    for spec in settings.resources() {
        let source = resolve_source(spec, settings)?;
        let name = source
            .file_name()
            .ok_or_else(|| Error::GenericError(format!("{} has no file name", source.display())))?;
        let dest = settings.packaging_root().join(name);

        tokio::fs::copy(&source, &dest)
            .await
            .fs_context("copying resource", &source)?;
        verify_copy(&source, &dest).await?;

        log::debug!("staged {} -> {}", source.display(), dest.display());
        staged.push(StagedFile { source, dest });
    }

    log::info!(
        "✓ Staged {} resource(s) into {}",
        staged.len(),
        settings.packaging_root().display()
    );
    Ok(staged)
}

/// Removes the staged copies recorded by [`stage_resources`].
///
/// Copies that are already gone are skipped, so cleanup can run after a
/// partial or interrupted stage.
pub fn remove_staged(staged: &[StagedFile]) -> Result<()> {
    for file in staged {
        remove_existing(&file.dest)?;
    }
    Ok(())
}

/// Removes staged copies without a staging record.
///
/// Derives the expected base names from the configured resource list and
/// deletes whichever of them exist in the packaging root. This is the
/// recovery path after a run that never got to clean up.
pub fn remove_expected(settings: &Settings) -> Result<()> {
    for spec in settings.resources() {
        for name in spec.dest_candidates(settings.platform()) {
            remove_existing(&settings.packaging_root().join(name))?;
        }
    }
    Ok(())
}

fn resolve_source(spec: &ResourceSpec, settings: &Settings) -> Result<PathBuf> {
    match spec {
        ResourceSpec::Path(rel) => {
            let path = settings.packaging_root().join(rel);
            if !path.is_file() {
                bail!("{} does not exist", path.display());
            }
            Ok(path)
        }
        ResourceSpec::Named(name) => lookup::find_library(name, settings.platform()),
    }
}

async fn verify_copy(source: &Path, dest: &Path) -> Result<()> {
    if checksum::sha256_file(source).await? != checksum::sha256_file(dest).await? {
        return Err(Error::ChecksumMismatch {
            path: dest.to_path_buf(),
        });
    }
    Ok(())
}

fn remove_existing(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("removed staged {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing staged resource", path),
    }
}
