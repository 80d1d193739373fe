// Command-line surface

pub mod commands;

pub use commands::{run_export, run_train, Cli, Command, ExportArgs, TrainArgs};
