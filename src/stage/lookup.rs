//! System library lookup.
//!
//! Resolves bare library names the way the platform's dynamic loader would:
//! the directories named by the loader's search-path variable are tried
//! first, then the fixed system locations.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::settings::Platform;

/// Resolves a library name to an existing file on the system search path.
///
/// Names carrying an extension are looked up verbatim; bare names expand to
/// the platform's library naming variants (`foo` becomes `libfoo.so` and
/// `foo.so` on Linux).
///
/// # Errors
///
/// Returns [`Error::LibraryNotFound`] when no candidate exists in any
/// search directory.
pub fn find_library(name: &str, platform: Platform) -> Result<PathBuf> {
    let dirs = search_dirs(platform);
    find_library_in(&dirs, name, platform).ok_or_else(|| Error::LibraryNotFound {
        name: name.to_string(),
    })
}

/// Resolves a library name against an explicit list of directories.
///
/// The directory order is the search order; the first existing candidate
/// wins.
pub fn find_library_in(dirs: &[PathBuf], name: &str, platform: Platform) -> Option<PathBuf> {
    let names = candidate_names(name, platform);
    for dir in dirs {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Directories searched for libraries, in search order.
fn search_dirs(platform: Platform) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    match platform {
        Platform::Windows => {
            push_env_paths(&mut dirs, "PATH");
            dirs.push(PathBuf::from(r"C:\Windows\System32"));
            dirs.push(PathBuf::from(r"C:\Windows"));
        }
        Platform::MacOs => {
            push_env_paths(&mut dirs, "DYLD_LIBRARY_PATH");
            push_env_paths(&mut dirs, "DYLD_FALLBACK_LIBRARY_PATH");
            dirs.push(PathBuf::from("/usr/local/lib"));
            dirs.push(PathBuf::from("/opt/homebrew/lib"));
            dirs.push(PathBuf::from("/usr/lib"));
        }
        Platform::Linux => {
            push_env_paths(&mut dirs, "LD_LIBRARY_PATH");
            dirs.push(PathBuf::from("/usr/local/lib"));
            dirs.push(PathBuf::from("/usr/lib/x86_64-linux-gnu"));
            dirs.push(PathBuf::from("/usr/lib"));
            dirs.push(PathBuf::from("/lib"));
        }
    }
    dirs
}

fn push_env_paths(dirs: &mut Vec<PathBuf>, var: &str) {
    if let Some(raw) = env::var_os(var) {
        dirs.extend(env::split_paths(&raw));
    }
}

/// File names a library name may resolve to, in preference order.
fn candidate_names(name: &str, platform: Platform) -> Vec<String> {
    if name.contains('.') {
        return vec![name.to_string()];
    }
    match platform {
        Platform::Windows => vec![format!("{name}.dll")],
        Platform::MacOs => vec![format!("lib{name}.dylib"), format!("{name}.dylib")],
        Platform::Linux => vec![format!("lib{name}.so"), format!("{name}.so")],
    }
}
