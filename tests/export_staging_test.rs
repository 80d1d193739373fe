// Integration tests: the export command forwards the right flags and stages
// the reported artifact into the deployment directory.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use crowdtools::cli::{run_export, Cli, Command, ExportArgs};
use crowdtools::config::{ExportConfig, ExportFormat, TrainConfig};
use crowdtools::detector::Detector;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Stub exporter: records the received config, writes a fake artifact next
/// to the weights, and reports its path the way the real toolchain does.
struct StubExporter {
    received: Mutex<Option<(PathBuf, ExportConfig)>>,
    artifact_bytes: &'static [u8],
}

impl StubExporter {
    fn new() -> Self {
        Self {
            received: Mutex::new(None),
            artifact_bytes: b"exported-graph",
        }
    }
}

#[async_trait]
impl Detector for StubExporter {
    async fn train(&self, _config: &TrainConfig) -> Result<PathBuf> {
        unreachable!("train must not be called by the export command")
    }

    async fn resume(&self, _last_checkpoint: &Path) -> Result<PathBuf> {
        unreachable!("resume must not be called by the export command")
    }

    async fn export(&self, weights: &Path, config: &ExportConfig) -> Result<PathBuf> {
        *self.received.lock().unwrap() = Some((weights.to_path_buf(), config.clone()));
        let artifact = weights.with_extension(config.format.extension());
        fs::write(&artifact, self.artifact_bytes)?;
        Ok(artifact)
    }
}

fn parse_export(argv: &[&str]) -> ExportArgs {
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Export(args) => args,
        other => panic!("Expected export command, got {:?}", other),
    }
}

#[tokio::test]
async fn test_onnx_half_export_end_to_end() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let weights = temp_dir.path().join("best.pt");
    fs::write(&weights, b"weights").unwrap();
    let output_dir = temp_dir.path().join("backend").join("models");

    let args = parse_export(&[
        "crowdtools",
        "export",
        "--weights",
        weights.to_str().unwrap(),
        "--format",
        "onnx",
        "--half",
        "--output-dir",
        output_dir.to_str().unwrap(),
    ]);
    let detector = StubExporter::new();

    run_export(&args, &detector).await.unwrap();

    let (seen_weights, config) = detector.received.lock().unwrap().clone().unwrap();
    assert_eq!(seen_weights, weights);
    assert_eq!(config.format, ExportFormat::Onnx);
    assert_eq!(config.imgsz, 480);
    assert!(config.half);
    assert!(config.simplify());

    // Staging directory was created and holds a byte-identical copy under
    // the artifact's own name
    let staged = output_dir.join("best.onnx");
    assert!(output_dir.is_dir());
    assert_eq!(fs::read(&staged).unwrap(), b"exported-graph");
    // The original artifact is still in place
    assert!(weights.with_extension("onnx").exists());
}

#[tokio::test]
async fn test_engine_export_disables_simplify_and_half_defaults_off() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let weights = temp_dir.path().join("best.pt");
    fs::write(&weights, b"weights").unwrap();
    let output_dir = temp_dir.path().join("models");

    let args = parse_export(&[
        "crowdtools",
        "export",
        "--weights",
        weights.to_str().unwrap(),
        "--format",
        "engine",
        "--output-dir",
        output_dir.to_str().unwrap(),
    ]);
    let detector = StubExporter::new();

    run_export(&args, &detector).await.unwrap();

    let (_, config) = detector.received.lock().unwrap().clone().unwrap();
    assert_eq!(config.format, ExportFormat::Engine);
    assert!(!config.half);
    assert!(!config.simplify());
    assert!(output_dir.join("best.engine").exists());
}

#[tokio::test]
async fn test_export_failure_propagates_without_staging() {
    struct FailingExporter;

    #[async_trait]
    impl Detector for FailingExporter {
        async fn train(&self, _config: &TrainConfig) -> Result<PathBuf> {
            unreachable!()
        }
        async fn resume(&self, _last_checkpoint: &Path) -> Result<PathBuf> {
            unreachable!()
        }
        async fn export(&self, _weights: &Path, _config: &ExportConfig) -> Result<PathBuf> {
            anyhow::bail!("unsupported hardware")
        }
    }

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("models");

    let args = parse_export(&[
        "crowdtools",
        "export",
        "--weights",
        "best.pt",
        "--output-dir",
        output_dir.to_str().unwrap(),
    ]);

    let err = run_export(&args, &FailingExporter).await.unwrap_err();
    assert!(err.to_string().contains("unsupported hardware"));
    // No staging happened
    assert!(!output_dir.exists());
}
