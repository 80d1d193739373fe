// Deployment staging
//
// Copies an exported artifact into the backend's models directory and prints
// the manual follow-up steps for the ONNX path (engine compilation happens on
// the target device, not here).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportFormat;

/// Copy `artifact` into `output_dir` under its original file name.
///
/// The directory is created if absent; the source file is left in place.
/// Returns the staged copy's path.
pub fn stage_artifact(artifact: &Path, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let file_name = artifact
        .file_name()
        .with_context(|| format!("Exported artifact has no file name: {}", artifact.display()))?;
    let staged = output_dir.join(file_name);

    fs::copy(artifact, &staged).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            artifact.display(),
            staged.display()
        )
    })?;

    // fs::copy carries permissions but not timestamps; carry the source
    // mtime too so the staged copy keeps the artifact's metadata.
    let modified = fs::metadata(artifact)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("Failed to read metadata of {}", artifact.display()))?;
    fs::File::options()
        .write(true)
        .open(&staged)
        .and_then(|file| file.set_modified(modified))
        .with_context(|| format!("Failed to set timestamp on {}", staged.display()))?;

    Ok(staged)
}

/// Print the manual conversion steps that follow an ONNX export.
///
/// The TensorRT engine must be built on the inference device itself, so this
/// can only ever be guidance text.
pub fn print_next_steps(format: ExportFormat, artifact: &Path, output_dir: &Path) {
    if format != ExportFormat::Onnx {
        return;
    }

    let artifact_name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.display().to_string());

    println!("\n--- Next Steps ---");
    println!("To convert ONNX to TensorRT on the Jetson Nano:");
    println!(
        "  trtexec --onnx={} --saveEngine=yolov8n_crowd.engine --fp16",
        artifact_name
    );
    println!("  cp yolov8n_crowd.engine {}/", output_dir.display());
    println!("\nThen update backend/data/config.json:");
    println!("  \"model_path\": \"models/yolov8n_crowd.engine\"");
}
