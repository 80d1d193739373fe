// Crowdtools - training and export tooling for the crowd person-detection model
// Library exports

pub mod cli;
pub mod config;
pub mod deploy; // Artifact staging into the backend deployment directory
pub mod detector; // Narrow seam around the external detection toolchain
pub mod errors;
