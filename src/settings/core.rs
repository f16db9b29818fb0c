//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

use super::{Platform, ResourceSpec};

/// Main settings for a staged packaging run.
///
/// Central configuration for the harness, constructed via [`SettingsBuilder`].
/// Everything the staging, patching, build, and repackaging phases need is
/// carried here; none of the phases read global state.
///
/// # Examples
///
/// ```no_run
/// use stagehand::{Platform, SettingsBuilder};
///
/// # fn example() -> stagehand::Result<()> {
/// let settings = SettingsBuilder::new()
///     .platform(Platform::Windows)
///     .packaging_root("desktop/src-tauri")
///     .product_name("vibe")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`ResourceSpec`] - One entry of the staging list
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Platform being staged for.
    platform: Platform,

    /// Directory holding the bundler manifest.
    ///
    /// Staged resources land directly in here.
    packaging_root: PathBuf,

    /// Path of the bundler manifest, normally `<packaging_root>/tauri.conf.json`.
    manifest_path: PathBuf,

    /// Resources to stage before the build.
    resources: Vec<ResourceSpec>,

    /// Product name, used for volume and artifact naming.
    product_name: String,

    /// Name of the release binary the signing hook points at.
    binary_name: String,

    /// Product version, when known from the manifest.
    version: Option<String>,

    /// Release directory the packaging build writes into.
    release_dir: PathBuf,

    /// Mount point used while the produced disk image is repackaged.
    mount_point: PathBuf,

    /// Do not invoke the packaging build.
    skip_build: bool,

    /// Leave staged resources and the patched manifest in place.
    skip_cleanup: bool,

    /// Repackage the produced disk image after the build.
    post_build: bool,
}

impl Settings {
    /// Returns the platform being staged for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the directory holding the bundler manifest.
    pub fn packaging_root(&self) -> &Path {
        &self.packaging_root
    }

    /// Returns the path of the bundler manifest.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the resources to stage.
    pub fn resources(&self) -> &[ResourceSpec] {
        &self.resources
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the product version, when the manifest declares one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the release directory the packaging build writes into.
    pub fn release_dir(&self) -> &Path {
        &self.release_dir
    }

    /// Returns the full path of the release binary.
    ///
    /// This is what the macOS manifest patch points `codesign` at.
    pub fn release_binary(&self) -> PathBuf {
        self.release_dir.join(&self.binary_name)
    }

    /// Returns the directory the bundler writes disk images into.
    pub fn dmg_dir(&self) -> PathBuf {
        self.release_dir.join("bundle").join("dmg")
    }

    /// Returns the mount point used while repackaging the disk image.
    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    /// Returns the path the repackaged disk image is written to.
    pub fn final_dmg_path(&self) -> PathBuf {
        let name = match &self.version {
            Some(version) => format!("{}-{}-final.dmg", self.product_name, version),
            None => format!("{}-final.dmg", self.product_name),
        };
        self.packaging_root.join(name)
    }

    /// Whether the packaging build itself is skipped.
    pub fn skip_build(&self) -> bool {
        self.skip_build
    }

    /// Whether staged resources and the patched manifest are left in place.
    pub fn skip_cleanup(&self) -> bool {
        self.skip_cleanup
    }

    /// Whether the produced disk image is repackaged after the build.
    pub fn post_build(&self) -> bool {
        self.post_build
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        platform: Platform,
        packaging_root: PathBuf,
        manifest_path: PathBuf,
        resources: Vec<ResourceSpec>,
        product_name: String,
        binary_name: String,
        version: Option<String>,
        release_dir: PathBuf,
        mount_point: PathBuf,
        skip_build: bool,
        skip_cleanup: bool,
        post_build: bool,
    ) -> Self {
        Self {
            platform,
            packaging_root,
            manifest_path,
            resources,
            product_name,
            binary_name,
            version,
            release_dir,
            mount_point,
            skip_build,
            skip_cleanup,
            post_build,
        }
    }
}
