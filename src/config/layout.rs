// Run directory layout
//
// The external toolchain writes every run under a conventional tree:
//   <runs_root>/<name>/weights/best.pt
//   <runs_root>/<name>/weights/last.pt
// The root is injected rather than hardcoded so tests can redirect I/O
// to a temporary directory.

use std::path::{Path, PathBuf};

/// Conventional location of training runs, keyed by run name
#[derive(Debug, Clone)]
pub struct RunLayout {
    runs_root: PathBuf,
}

impl Default for RunLayout {
    fn default() -> Self {
        Self {
            runs_root: PathBuf::from("runs/detect"),
        }
    }
}

impl RunLayout {
    /// Layout rooted at an explicit directory
    pub fn new(runs_root: impl Into<PathBuf>) -> Self {
        Self {
            runs_root: runs_root.into(),
        }
    }

    pub fn runs_root(&self) -> &Path {
        &self.runs_root
    }

    /// Directory of a single run
    pub fn run_dir(&self, name: &str) -> PathBuf {
        self.runs_root.join(name)
    }

    /// Best-weights checkpoint written at the end of a run
    pub fn best_weights(&self, name: &str) -> PathBuf {
        self.run_dir(name).join("weights").join("best.pt")
    }

    /// Last checkpoint, used to resume an interrupted run
    pub fn last_weights(&self, name: &str) -> PathBuf {
        self.run_dir(name).join("weights").join("last.pt")
    }
}
