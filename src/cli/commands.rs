// Train and export command handlers
//
// Both commands are a single linear transaction: parse, build a config
// record, delegate to the detector seam, report. Failures propagate
// unhandled; the toolchain owns its own diagnostics.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ExportConfig, ExportFormat, RunLayout, TrainConfig, DEFAULT_RUN_NAME};
use crate::deploy;
use crate::detector::Detector;

#[derive(Parser, Debug)]
#[command(name = "crowdtools")]
#[command(about = "Train and export the crowd person-detection model", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train YOLOv8-nano for person detection (run on a GPU machine, not the Jetson)
    Train(TrainArgs),
    /// Export trained weights for deployment
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Base model (yolov8n.pt for nano)
    #[arg(long, default_value = "yolov8n.pt")]
    pub model: String,

    /// Dataset YAML config
    #[arg(long, default_value = "dataset.yaml")]
    pub data: PathBuf,

    /// Training epochs
    #[arg(long, default_value_t = 50)]
    pub epochs: u32,

    /// Input image size
    #[arg(long, default_value_t = 480)]
    pub imgsz: u32,

    /// Batch size
    #[arg(long, default_value_t = 16)]
    pub batch: u32,

    /// GPU device (0, 1, cpu)
    #[arg(long, default_value = "0")]
    pub device: String,

    /// Resume from last checkpoint (always the default run name's; --name is ignored)
    #[arg(long)]
    pub resume: bool,

    /// Run name
    #[arg(long, default_value = DEFAULT_RUN_NAME)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to trained .pt weights
    #[arg(long)]
    pub weights: PathBuf,

    /// Input image size
    #[arg(long, default_value_t = 480)]
    pub imgsz: u32,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Onnx)]
    pub format: ExportFormat,

    /// FP16 export (recommended for Jetson)
    #[arg(long)]
    pub half: bool,

    /// Copy exported model here
    #[arg(long = "output-dir", default_value = "../backend/models")]
    pub output_dir: PathBuf,
}

impl TrainArgs {
    /// Build the configuration record forwarded to the toolchain
    pub fn to_config(&self) -> TrainConfig {
        TrainConfig {
            model: self.model.clone(),
            data: self.data.clone(),
            epochs: self.epochs,
            imgsz: self.imgsz,
            batch: self.batch,
            device: self.device.clone(),
            name: self.name.clone(),
            ..TrainConfig::default()
        }
    }
}

impl ExportArgs {
    pub fn to_config(&self) -> ExportConfig {
        ExportConfig {
            format: self.format,
            imgsz: self.imgsz,
            half: self.half,
        }
    }
}

/// Run the train command
pub async fn run_train(args: &TrainArgs, detector: &dyn Detector, layout: &RunLayout) -> Result<()> {
    let best = if args.resume {
        // Resume always reads the default run's checkpoint; a custom --name
        // is ignored on this path. Known fragility, kept as-is rather than
        // silently repaired.
        let last = layout.last_weights(DEFAULT_RUN_NAME);
        tracing::info!(checkpoint = %last.display(), "Resuming interrupted run");
        detector.resume(&last).await?
    } else {
        let config = args.to_config();
        tracing::info!(
            model = %config.model,
            epochs = config.epochs,
            imgsz = config.imgsz,
            batch = config.batch,
            device = %config.device,
            name = %config.name,
            "Starting training run"
        );
        detector.train(&config).await?
    };

    println!("\nTraining complete!");
    println!("Best weights: {}", best.display());
    println!("\nNext step: run `crowdtools export` to convert to ONNX/TensorRT");
    Ok(())
}

/// Run the export command
pub async fn run_export(args: &ExportArgs, detector: &dyn Detector) -> Result<()> {
    let config = args.to_config();

    println!("\nExporting to {}...", config.format.to_string().to_uppercase());
    let artifact = detector.export(&args.weights, &config).await?;
    println!("Exported to: {}", artifact.display());

    let staged = deploy::stage_artifact(&artifact, &args.output_dir)?;
    println!("Copied to: {}", staged.display());

    deploy::print_next_steps(config.format, &artifact, &args.output_dir);
    Ok(())
}
