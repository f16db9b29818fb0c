//! Full lifecycle behavior: stage, patch, build, restore.

mod common;

use std::path::Path;

use common::{FakeRunner, minimal_manifest, packaging_root_with_manifest, read_manifest};
use stagehand::{Error, Platform, ResourceSpec, Settings, SettingsBuilder, invoke, lifecycle};

fn write_lib(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create lib dir");
    }
    std::fs::write(path, contents).expect("write lib");
}

fn windows_settings(root: &Path) -> Settings {
    SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(root)
        .resources(vec![ResourceSpec::parse("libs/demo.dll")])
        .product_name("demo")
        .build()
        .expect("build settings")
}

#[tokio::test]
async fn a_successful_run_restores_the_packaging_root() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = windows_settings(&root);
    let runner = FakeRunner::new();

    lifecycle::run_build(&settings, &runner).await.expect("run");

    // exactly one tool ran: the packaging build, in the packaging root
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "cargo");
    assert_eq!(calls[0].args, ["tauri", "build"]);
    assert_eq!(calls[0].current_dir.as_deref(), Some(root.as_path()));

    // the patched PATH was handed to the build
    let path_override = calls[0]
        .envs
        .iter()
        .find(|(key, _)| key == "PATH")
        .expect("PATH override");
    assert!(
        path_override.1.starts_with(r"C:\Program Files\Nodejs;"),
        "got: {}",
        path_override.1
    );

    // the workspace is back in its pre-run state
    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
    assert!(!root.join("demo.dll").exists());
    assert!(root.join("libs/demo.dll").exists());
}

#[tokio::test]
async fn a_failed_build_still_restores_and_reports_the_failure() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = windows_settings(&root);
    let runner = FakeRunner::failing(101, "bundler exploded");

    let err = lifecycle::run_build(&settings, &runner)
        .await
        .expect_err("build failed");
    match &err {
        Error::ToolFailed { code, stderr, .. } => {
            assert_eq!(*code, Some(101));
            assert!(stderr.contains("bundler exploded"), "got: {stderr}");
        }
        other => panic!("unexpected error: {other}"),
    }

    // cleanup ran despite the failure
    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
    assert!(!root.join("demo.dll").exists());
}

#[tokio::test]
async fn skipping_the_build_runs_no_tools_but_cycles_the_workspace() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(&root)
        .resources(vec![ResourceSpec::parse("libs/demo.dll")])
        .product_name("demo")
        .skip_build(true)
        .build()
        .expect("build settings");
    let runner = FakeRunner::new();

    lifecycle::run_build(&settings, &runner).await.expect("run");

    assert!(runner.calls().is_empty(), "no tool may run");
    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("demo.dll").exists());
}

#[tokio::test]
async fn skipping_cleanup_leaves_the_patched_workspace_for_inspection() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(&root)
        .resources(vec![ResourceSpec::parse("libs/demo.dll")])
        .product_name("demo")
        .skip_build(true)
        .skip_cleanup(true)
        .build()
        .expect("build settings");

    lifecycle::run_build(&settings, &FakeRunner::new())
        .await
        .expect("run");

    // build-time state is still on disk
    assert!(root.join("demo.dll").exists());
    assert!(root.join("tauri.conf.old.json").exists());
    assert_eq!(
        read_manifest(&root)["tauri"]["bundle"]["resources"],
        serde_json::json!(["demo.dll"])
    );

    // a later clean-only pass restores it
    let cleanup = SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(&root)
        .resources(vec![ResourceSpec::parse("libs/demo.dll")])
        .product_name("demo")
        .build()
        .expect("build settings");
    lifecycle::clean_only(&cleanup).expect("clean");

    assert!(!root.join("demo.dll").exists());
    assert!(!root.join("tauri.conf.old.json").exists());
    assert_eq!(read_manifest(&root), minimal_manifest());
}

#[tokio::test]
async fn a_dropped_guard_restores_the_packaging_root() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = windows_settings(&root);

    let workspace = lifecycle::StagedWorkspace::acquire(&settings)
        .await
        .expect("acquire");
    let staged: Vec<_> = workspace
        .staged()
        .iter()
        .map(|file| file.dest.clone())
        .collect();
    assert_eq!(staged, [root.join("demo.dll")]);
    assert!(root.join("tauri.conf.old.json").exists());

    // dropped unconsumed, as an early `?` exit would leave it
    drop(workspace);

    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
    for dest in &staged {
        assert!(!dest.exists(), "{} must be removed", dest.display());
    }
}

#[tokio::test]
async fn a_panic_mid_build_still_restores_the_packaging_root() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = windows_settings(&root);

    let workspace = lifecycle::StagedWorkspace::acquire(&settings)
        .await
        .expect("acquire");
    let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _held = workspace;
        panic!("interrupted");
    }));
    assert!(unwound.is_err());

    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
    assert!(!root.join("demo.dll").exists());
}

#[tokio::test]
async fn a_disarmed_guard_leaves_the_staged_state_in_place() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    write_lib(&root, "libs/demo.dll", b"dll bytes");
    let settings = SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(&root)
        .resources(vec![ResourceSpec::parse("libs/demo.dll")])
        .product_name("demo")
        .skip_cleanup(true)
        .build()
        .expect("build settings");

    let workspace = lifecycle::StagedWorkspace::acquire(&settings)
        .await
        .expect("acquire");
    drop(workspace);

    // skip-cleanup holds even when the guard is dropped unconsumed
    assert!(root.join("demo.dll").exists());
    assert!(root.join("tauri.conf.old.json").exists());
}

#[test]
fn clean_only_without_a_backup_is_an_error() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let settings = windows_settings(&root);

    let err = lifecycle::clean_only(&settings).expect_err("nothing to clean");
    assert!(matches!(err, Error::BackupMissing { .. }), "got: {err}");
}

#[tokio::test]
async fn a_staging_failure_never_patches_the_manifest() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");
    write_lib(&root, "libs/good.dll", b"dll bytes");
    let settings = SettingsBuilder::new()
        .platform(Platform::Windows)
        .packaging_root(&root)
        .resources(vec![
            ResourceSpec::parse("libs/good.dll"),
            ResourceSpec::parse("libs/missing.dll"),
        ])
        .product_name("demo")
        .build()
        .expect("build settings");

    let err = lifecycle::run_build(&settings, &FakeRunner::new())
        .await
        .expect_err("staging failed");
    assert!(err.to_string().contains("does not exist"), "got: {err}");

    // the manifest was never touched, but the earlier copy stays behind
    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
    assert!(root.join("good.dll").exists());
}

#[test]
fn the_windows_build_environment_prepends_nodejs_to_path() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let settings = windows_settings(&root);

    let env = invoke::build_environment(&settings);
    let path = env
        .iter()
        .find(|(key, _)| key == "PATH")
        .expect("PATH override");
    assert!(path.1.starts_with(r"C:\Program Files\Nodejs;"));

    // OPENBLAS_PATH mirrors MINGW_PREFIX availability
    let has_openblas = env.iter().any(|(key, _)| key == "OPENBLAS_PATH");
    let has_prefix = std::env::var("MINGW_PREFIX").is_ok_and(|v| !v.is_empty());
    assert_eq!(has_openblas, has_prefix);
}

#[test]
fn other_platforms_build_in_the_inherited_environment() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let settings = SettingsBuilder::new()
        .platform(Platform::Linux)
        .packaging_root(&root)
        .product_name("demo")
        .build()
        .expect("build settings");

    assert!(invoke::build_environment(&settings).is_empty());
}
