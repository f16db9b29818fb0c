//! End-to-end runs of the stagehand binary.

mod common;

use assert_cmd::Command;
use common::{minimal_manifest, packaging_root_with_manifest};
use predicates::prelude::*;

fn stagehand() -> Command {
    let mut cmd = Command::cargo_bin("stagehand").expect("binary builds");
    // keep the ambient environment from toggling run modes
    cmd.env_remove("SKIP_BUILD")
        .env_remove("SKIP_CLEANUP")
        .env_remove("POST_BUILD");
    cmd
}

#[test]
fn help_describes_the_staging_cycle() {
    stagehand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tauri.conf.json"))
        .stdout(predicate::str::contains("--skip-build"))
        .stdout(predicate::str::contains("--clean-only"));
}

#[test]
fn unknown_platforms_are_rejected() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "solaris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform"));
}

#[test]
fn clean_only_conflicts_with_skip_cleanup() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--clean-only", "--skip-cleanup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicts"));
}

#[test]
fn clean_only_without_a_backup_fails() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    stagehand()
        .arg("-C")
        .arg(&root)
        .arg("--clean-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to restore"));
}

#[test]
fn a_missing_manifest_is_reported_with_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    stagehand()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("tauri.conf.json"));
}

#[test]
fn skip_build_env_flag_cycles_the_workspace_without_building() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");

    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux"])
        .env("SKIP_BUILD", "1")
        .assert()
        .success();

    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original,
        "the manifest comes back byte-identical"
    );
    assert!(!root.join("tauri.conf.old.json").exists());
}

#[test]
fn env_flags_other_than_one_are_ignored() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());

    // SKIP_CLEANUP=0 must not leave the backup behind
    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux", "--skip-build"])
        .env("SKIP_CLEANUP", "0")
        .assert()
        .success();

    assert!(!root.join("tauri.conf.old.json").exists());
}

#[test]
fn skip_cleanup_leaves_the_patched_state_and_clean_only_recovers_it() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");

    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux", "--skip-build", "--skip-cleanup"])
        .assert()
        .success();
    assert!(
        root.join("tauri.conf.old.json").exists(),
        "the backup stays for inspection"
    );

    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux", "--clean-only"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
}

#[test]
fn clean_only_recovers_a_root_where_only_the_backup_is_left() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());
    let original = std::fs::read(root.join("tauri.conf.json")).expect("read original");

    // the state an interrupted restore leaves behind
    std::fs::rename(
        root.join("tauri.conf.json"),
        root.join("tauri.conf.old.json"),
    )
    .expect("strip the manifest");

    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux", "--clean-only"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read(root.join("tauri.conf.json")).expect("read manifest"),
        original
    );
    assert!(!root.join("tauri.conf.old.json").exists());
}

#[test]
fn post_build_is_inert_off_macos() {
    let (_dir, root) = packaging_root_with_manifest(&minimal_manifest());

    stagehand()
        .arg("-C")
        .arg(&root)
        .args(["--platform", "linux", "--skip-build", "--post-build"])
        .assert()
        .success();
}
