// Ultralytics CLI adapter
//
// Delegates training and export to the Python `yolo` command-line tool as a
// blocking subprocess. The subprocess inherits stdout/stderr, so the
// toolchain's own progress output and diagnostics reach the console
// unchanged; this layer adds no retry or recovery of its own.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config::{ExportConfig, RunLayout, TrainConfig};
use crate::detector::{Detector, ExternalOpError};
use crate::errors;

/// Production `Detector` that shells out to the `yolo` CLI
pub struct UltralyticsCli {
    program: String,
    layout: RunLayout,
}

impl UltralyticsCli {
    pub fn new(layout: RunLayout) -> Self {
        Self {
            program: "yolo".to_string(),
            layout,
        }
    }

    /// Override the executable name (used by tests to point at a stub script)
    pub fn with_program(program: impl Into<String>, layout: RunLayout) -> Self {
        Self {
            program: program.into(),
            layout,
        }
    }

    /// Run the assembled command to completion and check its exit status
    async fn run(&self, mut cmd: Command, operation: &'static str) -> Result<()> {
        tracing::info!(program = %self.program, operation, "Invoking detection toolchain");

        let status = cmd
            .status()
            .await
            .with_context(|| errors::toolchain_missing_error(&self.program))
            .map_err(|e| ExternalOpError::new(operation, e))?;

        if !status.success() {
            return Err(ExternalOpError::new(
                operation,
                anyhow!("`{}` exited with {}", self.program, status),
            )
            .into());
        }

        tracing::info!(operation, "Toolchain call completed");
        Ok(())
    }
}

/// The `yolo` CLI takes Python-style booleans in its key=value arguments
fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[async_trait::async_trait]
impl Detector for UltralyticsCli {
    async fn train(&self, config: &TrainConfig) -> Result<PathBuf> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("detect")
            .arg("train")
            .arg(format!("model={}", config.model))
            .arg(format!("data={}", config.data.display()))
            .arg(format!("epochs={}", config.epochs))
            .arg(format!("imgsz={}", config.imgsz))
            .arg(format!("batch={}", config.batch))
            .arg(format!("device={}", config.device))
            .arg(format!("name={}", config.name))
            .arg(format!("single_cls={}", py_bool(config.single_cls)))
            .arg(format!("cos_lr={}", py_bool(config.cos_lr)))
            .arg(format!("close_mosaic={}", config.close_mosaic))
            .arg(format!("augment={}", py_bool(config.augment)));

        self.run(cmd, "train").await?;

        Ok(self.layout.best_weights(&config.name))
    }

    async fn resume(&self, last_checkpoint: &Path) -> Result<PathBuf> {
        // The checkpoint embeds the full run configuration; forward nothing
        // beyond the checkpoint itself.
        if !last_checkpoint.exists() {
            anyhow::bail!(errors::checkpoint_not_found_error(last_checkpoint));
        }

        let mut cmd = Command::new(&self.program);
        cmd.arg("detect")
            .arg("train")
            .arg(format!("model={}", last_checkpoint.display()))
            .arg("resume=True");

        self.run(cmd, "resume").await?;

        // A resumed run keeps writing into the directory it started in
        let run_dir = last_checkpoint
            .parent()
            .and_then(|weights| weights.parent())
            .ok_or_else(|| anyhow!("Checkpoint has no run directory: {}", last_checkpoint.display()))?;
        Ok(run_dir.join("weights").join("best.pt"))
    }

    async fn export(&self, weights: &Path, config: &ExportConfig) -> Result<PathBuf> {
        if !weights.exists() {
            anyhow::bail!(errors::weights_not_found_error(weights));
        }

        let mut cmd = Command::new(&self.program);
        cmd.arg("export")
            .arg(format!("model={}", weights.display()))
            .arg(format!("format={}", config.format))
            .arg(format!("imgsz={}", config.imgsz))
            .arg(format!("simplify={}", py_bool(config.simplify())))
            .arg(format!("half={}", py_bool(config.half)));

        self.run(cmd, "export").await?;

        // The toolchain writes the artifact next to the weights, with the
        // format's extension.
        Ok(weights.with_extension(config.format.extension()))
    }
}
