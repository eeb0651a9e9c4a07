use serde::Serialize;
use std::fmt;

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Build container the command is scoped to, if any
    pub container: Option<String>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            container: None,
        }
    }

    /// Runs `line` through `sh -c`, for user supplied command lines.
    pub fn shell(line: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(line)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        let container = container.into();
        if !container.trim().is_empty() {
            self.container = Some(container);
        }
        self
    }

    /// The command rendered as a single line, for logging and errors.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for arg in self.args.iter() {
            if arg.contains(char::is_whitespace) {
                parts.push(format!("\"{arg}\""));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Pull request opened by the artifact promotion stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestHandle {
    pub number: u64,
    pub project: String,
    pub url: Option<String>,
}

/// Request to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequest {
    pub title: String,
    pub project: String,
    pub head_branch: String,
    pub body: String,
}

/// Arguments for the artifact promotion stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoteArtifactsArgs {
    pub project: String,
    pub version: String,
    pub repo_ids: Vec<String>,
    pub container_name: String,
    pub helm_push: bool,
    pub update_next_development_version: bool,
    pub update_next_development_version_arguments: String,
}

/// Arguments for promoting docker images to another registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoteImagesArgs {
    pub version: String,
    pub organisation: String,
    pub registry: String,
    pub images: Vec<String>,
}

/// Arguments for tagging extra images with the release version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagImagesArgs {
    pub version: String,
    pub images: Vec<String>,
}

/// Arguments for waiting until a pull request is merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitForMergeArgs {
    pub pull_request: u64,
    pub project: String,
}

/// Arguments for waiting until an artifact shows up in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitForSyncArgs {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Artifact file extension, `jar` when absent
    pub ext: Option<String>,
    /// Repository base URL, maven central when absent
    pub repo: Option<String>,
}
