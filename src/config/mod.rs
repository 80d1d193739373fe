// Configuration records for the train and export commands

pub mod layout;
pub mod settings;

pub use layout::RunLayout;
pub use settings::{ExportConfig, ExportFormat, TrainConfig, DEFAULT_RUN_NAME};
