#![allow(dead_code)]

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::{env, fs};

use tempfile::TempDir;
use walkdir::WalkDir;

/// Global mutex to ensure only one test manipulates the environment at a time.
static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// RAII guard that redirects HOME to a temporary directory and lets a test
/// set extra environment variables.
///
/// While the guard is alive, `~` patterns resolve inside the sandbox, so
/// tests cannot touch the developer's real home directory. Every variable
/// changed through the guard is restored on drop.
pub struct TempHomeGuard {
    _lock: MutexGuard<'static, ()>,
    temp_home: TempDir,
    saved: Vec<(String, Option<OsString>)>,
}

impl TempHomeGuard {
    /// Create a new guard with a fresh temporary home directory.
    pub fn new() -> Self {
        // A failed test may have poisoned the mutex; the environment is
        // restored on drop regardless, so the lock is still usable.
        let lock = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let temp_home = TempDir::new().expect("failed to create temporary HOME");

        let mut guard = Self {
            _lock: lock,
            temp_home,
            saved: Vec::new(),
        };
        let home = guard.home().to_path_buf();
        guard.set_var("HOME", &home);
        #[cfg(windows)]
        guard.set_var("USERPROFILE", &home);
        guard
    }

    /// Path to the temporary HOME directory (canonicalized).
    pub fn home(&self) -> PathBuf {
        self.temp_home
            .path()
            .canonicalize()
            .expect("temporary HOME should exist")
    }

    /// Set an environment variable for the lifetime of the guard.
    pub fn set_var(&mut self, name: &str, value: impl AsRef<std::ffi::OsStr>) {
        if !self.saved.iter().any(|(saved, _)| saved == name) {
            self.saved.push((name.to_string(), env::var_os(name)));
        }
        // SAFETY: we hold ENV_MUTEX, ensuring no other test thread mutates
        // the environment concurrently.
        unsafe {
            env::set_var(name, value);
        }
    }
}

impl Drop for TempHomeGuard {
    fn drop(&mut self) {
        // SAFETY: guarded by ENV_MUTEX; we restore the environment to its
        // previous state before releasing the lock.
        unsafe {
            for (name, prev) in self.saved.drain(..).rev() {
                match prev {
                    Some(value) => env::set_var(&name, value),
                    None => env::remove_var(&name),
                }
            }
        }
    }
}

/// A canonical temporary workspace root whose name is not hidden
pub fn workspace() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::Builder::new().prefix("sweep-").tempdir().unwrap();
    let root = temp_dir.path().canonicalize().unwrap();
    (temp_dir, root)
}

/// Create a file (and its parents) with some content
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"content").unwrap();
}

/// Every path under `root`, relative to it
pub fn snapshot(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}
