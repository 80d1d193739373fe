// User-friendly error messages
//
// Helpers that turn the common operator mistakes into actionable messages.
// Toolchain-internal failures are not reworded; the toolchain's own
// diagnostics pass through untouched.

use std::path::Path;

/// Format a missing-weights error with helpful suggestions
pub fn weights_not_found_error(path: &Path) -> String {
    format!(
        "Weights file not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Training has not been run yet\n\
        • Wrong path specified\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Train a model first:\n\
           \x1b[36mcrowdtools train\x1b[0m\n\n\
        2. Point at the run's best weights:\n\
           \x1b[36mcrowdtools export --weights runs/detect/crowd_yolov8n/weights/best.pt\x1b[0m",
        path.display()
    )
}

/// Format a missing-checkpoint error for the resume path
pub fn checkpoint_not_found_error(path: &Path) -> String {
    format!(
        "Last checkpoint not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • No previous run to resume\n\
        • The run used a custom --name (resume always looks under the default run name)\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Start a fresh run:\n\
           \x1b[36mcrowdtools train\x1b[0m\n\n\
        2. Check what runs exist:\n\
           \x1b[36mls runs/detect/\x1b[0m",
        path.display()
    )
}

/// Format a missing-toolchain error with install instructions
pub fn toolchain_missing_error(program: &str) -> String {
    format!(
        "Could not run `{}`\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • The Ultralytics toolchain is not installed\n\
        • It is installed in a Python environment that is not active\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Install the toolchain:\n\
           \x1b[36mpip install ultralytics\x1b[0m\n\n\
        2. Check it is on PATH:\n\
           \x1b[36mwhich {}\x1b[0m",
        program, program
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_weights_not_found_suggests_training() {
        let msg = weights_not_found_error(&PathBuf::from("best.pt"));
        assert!(msg.contains("crowdtools train"));
        assert!(msg.contains("best.pt"));
    }

    #[test]
    fn test_checkpoint_not_found_mentions_name_fragility() {
        let msg = checkpoint_not_found_error(&PathBuf::from("runs/detect/x/weights/last.pt"));
        assert!(msg.contains("custom --name"));
    }

    #[test]
    fn test_toolchain_missing_has_install_command() {
        let msg = toolchain_missing_error("yolo");
        assert!(msg.contains("pip install ultralytics"));
    }
}
