//! Shared fixtures for harness tests.

#![allow(dead_code)] // each test binary uses a different slice of these helpers

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stagehand::{Result, ToolCommand, ToolOutput, ToolRunner};

/// Scripted stand-in for the external tool layer.
///
/// Records every command it is asked to run. Outcomes are served from a
/// queue; once the queue is empty every command succeeds with empty output.
/// Hooks run on each call so tests can materialize the artifacts a real
/// tool would have produced.
pub struct FakeRunner {
    calls: Mutex<Vec<ToolCommand>>,
    outcomes: Mutex<VecDeque<ToolOutput>>,
    hooks: Mutex<Vec<Box<dyn Fn(&ToolCommand) + Send>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcomes: Mutex::new(VecDeque::new()),
            hooks: Mutex::new(Vec::new()),
        }
    }

    /// Runner whose first command fails with the given exit code and stderr.
    pub fn failing(code: i32, stderr: &str) -> Self {
        let runner = Self::new();
        runner.push_outcome(ToolOutput {
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        });
        runner
    }

    pub fn push_outcome(&self, outcome: ToolOutput) {
        self.outcomes.lock().expect("outcomes lock").push_back(outcome);
    }

    pub fn on_call(&self, hook: impl Fn(&ToolCommand) + Send + 'static) {
        self.hooks.lock().expect("hooks lock").push(Box::new(hook));
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl ToolRunner for FakeRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        self.calls.lock().expect("calls lock").push(command.clone());
        for hook in self.hooks.lock().expect("hooks lock").iter() {
            hook(command);
        }
        let outcome = self
            .outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or(ToolOutput {
                code: Some(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            });
        Ok(outcome)
    }
}

/// Writes a manifest into a fresh packaging root.
///
/// Returns the tempdir (keep it alive) and the packaging root inside it.
pub fn packaging_root_with_manifest(manifest: &serde_json::Value) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let root = dir.path().join("src-tauri");
    std::fs::create_dir_all(&root).expect("create packaging root");
    let text = serde_json::to_string_pretty(manifest).expect("serialize manifest");
    std::fs::write(root.join("tauri.conf.json"), text).expect("write manifest");
    (dir, root)
}

/// A minimal manifest with the sections every platform patch needs.
pub fn minimal_manifest() -> serde_json::Value {
    serde_json::json!({
        "package": { "productName": "demo", "version": "1.2.3" },
        "build": { "distDir": "../dist" },
        "tauri": { "bundle": { "identifier": "com.example.demo" } }
    })
}

/// Parses the manifest back out of a packaging root.
pub fn read_manifest(root: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(root.join("tauri.conf.json")).expect("read manifest");
    serde_json::from_str(&raw).expect("parse manifest")
}
