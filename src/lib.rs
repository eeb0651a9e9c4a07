pub mod adapter;
pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;

pub use error::{Result, StagehandError};
pub use orchestrator::{ReleaseOrchestrator, report::ReleaseReport};

#[cfg(test)]
pub mod test_helpers;
