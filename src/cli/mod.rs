//! Command line interface for the staging harness.
//!
//! Parses and validates arguments, fills in run settings from the manifest,
//! and hands off to the lifecycle. All user-facing policy (platform
//! selection, flag/environment precedence, manifest-derived naming) lives
//! here so the library layers below stay configuration-free.

mod args;

pub use args::Args;

use crate::error::{Error, Result};
use crate::settings::{Platform, ResourceSpec, Settings, SettingsBuilder};
use crate::tool::ProcessRunner;
use crate::{lifecycle, manifest};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| Error::InvalidArguments { reason })?;

    let settings = build_settings(&args).await?;
    log::debug!("run settings: {settings:?}");

    if args.clean_only {
        lifecycle::clean_only(&settings)?;
        return Ok(0);
    }

    let runner = ProcessRunner::new();
    lifecycle::run_build(&settings, &runner).await?;
    Ok(0)
}

/// Assembles run settings from arguments and the manifest.
///
/// Product name and version come from the manifest's `package` section
/// unless overridden; a manifest without a product name gets the neutral
/// fallback so volume and artifact names stay predictable. Clean-only runs
/// tolerate an unreadable manifest: recovery has to work from a root where
/// only the backup is left.
async fn build_settings(args: &Args) -> Result<Settings> {
    let platform = match &args.platform {
        Some(name) => Platform::parse(name)?,
        None => Platform::host(),
    };

    let manifest_path = args.packaging_root.join("tauri.conf.json");
    let info = match manifest::read_product_info(&manifest_path).await {
        Ok(info) => info,
        Err(e) if args.clean_only => {
            log::warn!(
                "manifest at {} is unreadable ({e}); cleaning with default naming",
                manifest_path.display()
            );
            manifest::ProductInfo::default()
        }
        Err(e) => return Err(e),
    };

    let product_name = match args.product_name.clone().or(info.product_name) {
        Some(name) => name,
        None => {
            log::warn!("manifest has no package.productName; artifacts will be named \"app\"");
            "app".to_string()
        }
    };

    let mut builder = SettingsBuilder::new()
        .platform(platform)
        .packaging_root(&args.packaging_root)
        .manifest_path(&manifest_path)
        .product_name(product_name)
        .skip_build(args.skip_build())
        .skip_cleanup(args.skip_cleanup())
        .post_build(args.post_build());

    if let Some(name) = &args.binary_name {
        builder = builder.binary_name(name);
    }
    if let Some(version) = info.version {
        builder = builder.version(version);
    }
    if let Some(dir) = &args.release_dir {
        builder = builder.release_dir(dir);
    }
    if let Some(mount) = &args.mount_point {
        builder = builder.mount_point(mount);
    }
    for entry in &args.resources {
        builder = builder.resource(ResourceSpec::parse(entry));
    }

    builder.build()
}
