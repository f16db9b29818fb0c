//! Bundler manifest backup, patch, and restore.
//!
//! The packaging build reads `tauri.conf.json`, so platform-specific entries
//! have to be written into the real file rather than passed on the side. The
//! patch is sandwiched between a backup and a restore:
//!
//! 1. `patch` copies the manifest to `tauri.conf.old.json`, then rewrites the
//!    platform-specific section in place,
//! 2. the packaging build runs against the patched file,
//! 3. `restore` moves the backup back over the manifest.
//!
//! A leftover backup means an earlier run never restored; `patch` refuses to
//! run in that state so the pristine manifest cannot be overwritten with an
//! already-patched one.
//!
//! The manifest is edited as a JSON value with field order preserved, so a
//! restore-less diff against version control only ever shows the patched
//! entries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Value, ser::PrettyFormatter};

use crate::error::{Context, Error, ErrorExt, Result};
use crate::settings::{Platform, Settings};
use crate::stage::StagedFile;

/// Returns the backup path for a manifest.
///
/// `tauri.conf.json` backs up to `tauri.conf.old.json` next to it.
pub fn backup_path(manifest: &Path) -> PathBuf {
    let mut path = manifest.to_path_buf();
    path.set_extension("old.json");
    path
}

/// Backs up the manifest and patches it for the target platform.
///
/// On Windows the staged file names are appended to `tauri.bundle.resources`
/// so the bundler ships them next to the executable. On macOS an ad-hoc
/// `codesign` invocation for the release binary is written into
/// `build.beforeBundleCommand`. On Linux the manifest is rewritten without
/// platform entries.
///
/// # Errors
///
/// Returns [`Error::BackupExists`] when a backup is already present, and
/// [`Error::ManifestShape`] when the section to patch is missing.
pub async fn patch(settings: &Settings, staged: &[StagedFile]) -> Result<()> {
    let manifest = settings.manifest_path();
    let backup = backup_path(manifest);
    if backup.exists() {
        return Err(Error::BackupExists { path: backup });
    }

    tokio::fs::copy(manifest, &backup)
        .await
        .fs_context("backing up manifest", manifest)?;

    let raw = tokio::fs::read_to_string(manifest)
        .await
        .fs_context("reading manifest", manifest)?;
    let mut doc: Value = serde_json::from_str(&raw)?;

    apply_platform_patch(&mut doc, manifest, settings, staged)?;
    write_pretty(manifest, &doc).await?;

    log::info!("✓ Patched {} for {}", manifest.display(), settings.platform());
    Ok(())
}

/// Moves the backup back over the manifest.
///
/// The backup is consumed by the move, so after a successful restore the
/// packaging root looks exactly as it did before `patch` ran.
///
/// # Errors
///
/// Returns [`Error::BackupMissing`] when there is no backup to restore from.
pub fn restore(settings: &Settings) -> Result<()> {
    let manifest = settings.manifest_path();
    let backup = backup_path(manifest);
    if !backup.exists() {
        return Err(Error::BackupMissing { path: backup });
    }

    // Windows cannot rename over an existing file.
    match std::fs::remove_file(manifest) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("removing patched manifest", manifest),
    }
    std::fs::rename(&backup, manifest).fs_context("restoring manifest", manifest)?;

    log::info!("✓ Restored {}", manifest.display());
    Ok(())
}

/// Product metadata read from the manifest's `package` section.
#[derive(Debug, Default)]
pub struct ProductInfo {
    /// `package.productName`, when present.
    pub product_name: Option<String>,
    /// `package.version`, when present.
    pub version: Option<String>,
}

/// Reads product name and version out of the manifest.
///
/// Both fields are optional in the schema; missing fields come back as
/// `None` rather than as errors.
pub async fn read_product_info(manifest: &Path) -> Result<ProductInfo> {
    #[derive(Default, Deserialize)]
    struct RawManifest {
        #[serde(default)]
        package: RawPackage,
    }

    #[derive(Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawPackage {
        #[serde(default)]
        product_name: Option<String>,
        #[serde(default)]
        version: Option<String>,
    }

    let raw = tokio::fs::read_to_string(manifest)
        .await
        .fs_context("reading manifest", manifest)?;
    let doc: RawManifest = serde_json::from_str(&raw)?;

    Ok(ProductInfo {
        product_name: doc.package.product_name,
        version: doc.package.version,
    })
}

fn apply_platform_patch(
    doc: &mut Value,
    manifest: &Path,
    settings: &Settings,
    staged: &[StagedFile],
) -> Result<()> {
    match settings.platform() {
        Platform::Windows => {
            let bundle = doc
                .pointer_mut("/tauri/bundle")
                .and_then(Value::as_object_mut)
                .ok_or_else(|| Error::ManifestShape {
                    path: manifest.to_path_buf(),
                    detail: "`tauri.bundle` object".to_string(),
                })?;
            let resources = bundle
                .entry("resources")
                .or_insert_with(|| Value::Array(Vec::new()));
            let list = resources
                .as_array_mut()
                .ok_or_else(|| Error::ManifestShape {
                    path: manifest.to_path_buf(),
                    detail: "`tauri.bundle.resources` array".to_string(),
                })?;
            for file in staged {
                let name = file
                    .dest_name()
                    .context("staged file name is not valid UTF-8")?;
                list.push(Value::String(name.to_string()));
            }
        }
        Platform::MacOs => {
            let build = doc
                .pointer_mut("/build")
                .and_then(Value::as_object_mut)
                .ok_or_else(|| Error::ManifestShape {
                    path: manifest.to_path_buf(),
                    detail: "`build` object".to_string(),
                })?;
            let command = format!("codesign -s - {}", settings.release_binary().display());
            build.insert(
                "beforeBundleCommand".to_string(),
                Value::String(command),
            );
        }
        Platform::Linux => {}
    }
    Ok(())
}

/// Serializes the manifest with 4-space indentation.
async fn write_pretty(path: &Path, doc: &Value) -> Result<()> {
    let mut buf = Vec::with_capacity(4096);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    buf.push(b'\n');
    tokio::fs::write(path, &buf)
        .await
        .fs_context("writing manifest", path)
}
