//! Concrete capability implementations.
//!
//! Most collaborators are thin wrappers that turn a capability call into one
//! or more [`ShellCommand`](crate::capability::types::ShellCommand)s run by a
//! [`CommandRunner`](crate::capability::traits::CommandRunner). Pull requests
//! go through the GitHub API and artifact sync is checked over HTTP.
pub mod central;
pub mod docker;
pub mod factory;
pub mod github;
pub mod kubernetes;
pub mod maven;
pub mod poll;
pub mod shell;
