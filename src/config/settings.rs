// Transient configuration records
//
// Each invocation builds one of these from CLI flags, hands it by reference
// to the detector seam, and discards it. Nothing here is persisted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Run name used when no `--name` is given, and always used by the resume
/// path (a custom name is ignored when resuming; see `run_train`).
pub const DEFAULT_RUN_NAME: &str = "crowd_yolov8n";

/// Configuration for a fresh training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Base model reference (pretrained checkpoint, e.g. "yolov8n.pt")
    pub model: String,
    /// Dataset descriptor YAML path
    pub data: PathBuf,
    /// Training epoch count
    pub epochs: u32,
    /// Input image size
    pub imgsz: u32,
    /// Batch size
    pub batch: u32,
    /// Compute device selector ("0", "1", "cpu", ...)
    pub device: String,
    /// Run name, namespaces the output directory tree
    pub name: String,
    /// Collapse every class to a single "person" class
    pub single_cls: bool,
    /// Cosine-annealed learning rate schedule
    pub cos_lr: bool,
    /// Disable mosaic augmentation for the final N epochs
    pub close_mosaic: u32,
    /// Enable augmentation
    pub augment: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            model: "yolov8n.pt".to_string(),
            data: PathBuf::from("dataset.yaml"),
            epochs: 50,
            imgsz: 480,
            batch: 16,
            device: "0".to_string(),
            name: DEFAULT_RUN_NAME.to_string(),
            // Person-detection optimizations, fixed for every run
            single_cls: true,
            cos_lr: true,
            close_mosaic: 10,
            augment: true,
        }
    }
}

/// Export target format (closed set, rejected at parse time otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Portable ONNX graph, usable across inference engines
    Onnx,
    /// TensorRT engine, compiled for the device it is built on
    Engine,
}

impl ExportFormat {
    /// File extension the toolchain gives the produced artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Onnx => "onnx",
            ExportFormat::Engine => "engine",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for an export invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export target format
    pub format: ExportFormat,
    /// Input image size baked into the exported graph
    pub imgsz: u32,
    /// Reduced-precision (FP16) export
    pub half: bool,
}

impl ExportConfig {
    /// Graph simplification is only meaningful for the ONNX path
    pub fn simplify(&self) -> bool {
        self.format == ExportFormat::Onnx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_defaults_match_documented_values() {
        let config = TrainConfig::default();
        assert_eq!(config.model, "yolov8n.pt");
        assert_eq!(config.data, PathBuf::from("dataset.yaml"));
        assert_eq!(config.epochs, 50);
        assert_eq!(config.imgsz, 480);
        assert_eq!(config.batch, 16);
        assert_eq!(config.device, "0");
        assert_eq!(config.name, DEFAULT_RUN_NAME);
        assert!(config.single_cls);
        assert!(config.cos_lr);
        assert_eq!(config.close_mosaic, 10);
        assert!(config.augment);
    }

    #[test]
    fn test_simplify_only_for_onnx() {
        let onnx = ExportConfig {
            format: ExportFormat::Onnx,
            imgsz: 480,
            half: false,
        };
        let engine = ExportConfig {
            format: ExportFormat::Engine,
            imgsz: 480,
            half: false,
        };
        assert!(onnx.simplify());
        assert!(!engine.simplify());
    }

    #[test]
    fn test_format_display_matches_extension() {
        assert_eq!(ExportFormat::Onnx.to_string(), "onnx");
        assert_eq!(ExportFormat::Engine.to_string(), "engine");
    }

    #[test]
    fn test_train_config_json_round_trip() {
        let config = TrainConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: TrainConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.model, config.model);
        assert_eq!(restored.epochs, config.epochs);
        assert_eq!(restored.name, config.name);
        assert_eq!(restored.close_mosaic, config.close_mosaic);
        assert_eq!(restored.single_cls, config.single_cls);
    }

    #[test]
    fn test_format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ExportFormat::Onnx).unwrap(), "\"onnx\"");
        let format: ExportFormat = serde_json::from_str("\"engine\"").unwrap();
        assert_eq!(format, ExportFormat::Engine);
    }
}
