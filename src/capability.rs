//! Narrow capabilities the release stages delegate their work to.
//!
//! Each collaborator (repository manager, container registry, GitHub, the
//! shell, ...) sits behind its own single-purpose trait so stages can be
//! composed and tested against mocks. [`manager::CapabilityManager`] bundles
//! one implementation of each and applies dry-run handling.
pub mod manager;
pub mod traits;
pub mod types;
