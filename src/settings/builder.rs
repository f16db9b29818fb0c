//! Builder for constructing Settings.

use std::path::{Path, PathBuf};

use super::{Platform, ResourceSpec, Settings, default_resources};
use crate::error::{Context, Result};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for assembling a run configuration. Only the
/// packaging root is required; everything else defaults relative to it the
/// way a Tauri project is laid out.
///
/// # Examples
///
/// ```no_run
/// use stagehand::{Platform, SettingsBuilder};
///
/// # fn example() -> stagehand::Result<()> {
/// let settings = SettingsBuilder::new()
///     .platform(Platform::MacOs)
///     .packaging_root("desktop/src-tauri")
///     .product_name("vibe")
///     .post_build(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    platform: Option<Platform>,
    packaging_root: Option<PathBuf>,
    manifest_path: Option<PathBuf>,
    resources: Option<Vec<ResourceSpec>>,
    extra_resources: Vec<ResourceSpec>,
    product_name: Option<String>,
    binary_name: Option<String>,
    version: Option<String>,
    release_dir: Option<PathBuf>,
    mount_point: Option<PathBuf>,
    skip_build: bool,
    skip_cleanup: bool,
    post_build: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the platform to stage for.
    ///
    /// Default: the host platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the directory holding the bundler manifest.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn packaging_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.packaging_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the manifest path explicitly.
    ///
    /// Default: `<packaging_root>/tauri.conf.json`.
    pub fn manifest_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the staged resource list entirely.
    ///
    /// Default: the platform's built-in list, see [`default_resources`].
    pub fn resources(mut self, resources: Vec<ResourceSpec>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Appends one resource to the staged list.
    pub fn resource(mut self, resource: ResourceSpec) -> Self {
        self.extra_resources.push(resource);
        self
    }

    /// Sets the product name used for volume and artifact naming.
    ///
    /// Default: `"app"`.
    pub fn product_name<S: Into<String>>(mut self, name: S) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the release binary name the signing hook points at.
    ///
    /// Default: the product name.
    pub fn binary_name<S: Into<String>>(mut self, name: S) -> Self {
        self.binary_name = Some(name.into());
        self
    }

    /// Sets the product version used for artifact naming.
    ///
    /// Default: none; artifacts are named without a version.
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the release directory the packaging build writes into.
    ///
    /// Default: `<packaging_root>/../../target/release`.
    pub fn release_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.release_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the mount point used while repackaging the disk image.
    ///
    /// Default: `/Volumes/<product>-staging`.
    pub fn mount_point<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.mount_point = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips the packaging build while keeping the stage and restore phases.
    pub fn skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    /// Leaves staged resources and the patched manifest in place afterwards.
    pub fn skip_cleanup(mut self, skip: bool) -> Self {
        self.skip_cleanup = skip;
        self
    }

    /// Repackages the produced disk image after the build.
    pub fn post_build(mut self, enabled: bool) -> Self {
        self.post_build = enabled;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `packaging_root` is missing.
    pub fn build(self) -> Result<Settings> {
        let platform = self.platform.unwrap_or_else(Platform::host);
        let packaging_root = self.packaging_root.context("packaging_root is required")?;
        let manifest_path = self
            .manifest_path
            .unwrap_or_else(|| packaging_root.join("tauri.conf.json"));

        let mut resources = self
            .resources
            .unwrap_or_else(|| default_resources(platform));
        resources.extend(self.extra_resources);

        let product_name = self.product_name.unwrap_or_else(|| "app".to_string());
        let binary_name = self.binary_name.unwrap_or_else(|| product_name.clone());
        let release_dir = self
            .release_dir
            .unwrap_or_else(|| packaging_root.join("../../target/release"));
        let mount_point = self
            .mount_point
            .unwrap_or_else(|| PathBuf::from(format!("/Volumes/{product_name}-staging")));

        Ok(Settings::new(
            platform,
            packaging_root,
            manifest_path,
            resources,
            product_name,
            binary_name,
            self.version,
            release_dir,
            mount_point,
            self.skip_build,
            self.skip_cleanup,
            self.post_build,
        ))
    }
}
