//! Error types for stagehand operations.

use thiserror::Error;

/// Main error type for stagehand operations.
#[derive(Error, Debug)]
pub enum StagehandError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Shell errors
    #[error("Command `{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    // Repository manager errors
    #[error("Failed to release staging repository {repo_id}: {reason}")]
    StagingRelease { repo_id: String, reason: String },

    // Pull request errors
    #[error("Pull request #{number} was closed without being merged")]
    PullRequestClosed { number: u64 },

    #[error("Timed out after {elapsed_secs}s waiting for {what}")]
    Timeout { what: String, elapsed_secs: u64 },

    #[error("GitHub API error: {0}")]
    GithubError(String),

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using StagehandError
pub type Result<T> = std::result::Result<T, StagehandError>;

impl StagehandError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn command_failed(
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    pub fn timeout(what: impl Into<String>, elapsed_secs: u64) -> Self {
        Self::Timeout {
            what: what.into(),
            elapsed_secs,
        }
    }
}

// Wraps in Other variant for generic I/O errors
impl From<std::io::Error> for StagehandError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<reqwest::Error> for StagehandError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::NetworkError(format!("{status}: {err}"))
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

impl From<octocrab::Error> for StagehandError {
    fn from(err: octocrab::Error) -> Self {
        Self::GithubError(err.to_string())
    }
}
