// Detection toolchain seam
//
// The commands never talk to the external toolchain directly; they depend
// on this trait, so tests can substitute a double and the production
// adapter stays swappable.

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::{ExportConfig, TrainConfig};

pub mod ultralytics;

pub use ultralytics::UltralyticsCli;

/// A failure inside the external toolchain, carrying the underlying cause.
///
/// There is deliberately no finer-grained taxonomy: the toolchain owns its
/// diagnostics, and this layer only propagates them.
#[derive(Debug, thiserror::Error)]
#[error("external {operation} operation failed")]
pub struct ExternalOpError {
    /// Which toolchain call failed ("train", "resume", "export")
    pub operation: &'static str,
    #[source]
    pub source: anyhow::Error,
}

impl ExternalOpError {
    pub fn new(operation: &'static str, source: anyhow::Error) -> Self {
        Self { operation, source }
    }
}

/// Narrow interface over the external detection toolchain
#[async_trait]
pub trait Detector: Send + Sync {
    /// Start a fresh training run; returns the best-weights path
    async fn train(&self, config: &TrainConfig) -> Result<PathBuf>;

    /// Resume an interrupted run from its last checkpoint; the checkpoint
    /// embeds the original run configuration, so nothing else is forwarded
    async fn resume(&self, last_checkpoint: &Path) -> Result<PathBuf>;

    /// Export trained weights; returns the produced artifact's path
    async fn export(&self, weights: &Path, config: &ExportConfig) -> Result<PathBuf>;
}
