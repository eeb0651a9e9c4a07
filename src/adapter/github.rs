//! GitHub pull requests through octocrab.
use async_trait::async_trait;
use git_url_parse::GitUrl;
use log::*;
use octocrab::{Octocrab, models::IssueState};
use secrecy::{ExposeSecret, SecretString};
use std::env;

use crate::{
    Result,
    adapter::poll::{PollPolicy, PollState},
    capability::{
        traits::{PullRequestCreator, PullRequestWatcher},
        types::{CreatePullRequest, PullRequestHandle, WaitForMergeArgs},
    },
    config::services::GithubConfig,
    error::StagehandError,
};

/// Connection details parsed from the configured repository URL.
#[derive(Debug, Clone)]
pub struct GithubRemote {
    pub scheme: String,
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub token: SecretString,
}

impl GithubRemote {
    /// Parses `config.repo` and resolves the access token from the config,
    /// the URL itself, or the GITHUB_TOKEN env var, in that order.
    pub fn from_config(config: &GithubConfig) -> Result<Self> {
        let parsed = GitUrl::parse(config.repo.trim())?;

        validate_scheme(parsed.scheme)?;

        let mut token = config
            .token
            .as_ref()
            .map(|t| t.expose_secret().to_string())
            .unwrap_or_default();

        if token.is_empty()
            && let Some(parsed_token) = parsed.token
        {
            token = parsed_token;
        }

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(StagehandError::invalid_config("must set github token"));
        }

        let host = parsed.host.ok_or_else(|| {
            StagehandError::invalid_config("unable to parse host from github repo")
        })?;

        let owner = parsed.owner.ok_or_else(|| {
            StagehandError::invalid_config("unable to parse owner from github repo")
        })?;

        Ok(Self {
            scheme: parsed.scheme.to_string(),
            host,
            owner,
            repo: parsed.name,
            token: SecretString::from(token),
        })
    }

    pub fn api_base_uri(&self) -> String {
        format!("{}://api.{}", self.scheme, self.host)
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(StagehandError::invalid_config(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Maps the observed state of a pull request onto a poll result.
pub fn merge_progress(
    number: u64,
    merged: bool,
    closed: bool,
) -> Result<PollState<()>> {
    if merged {
        return Ok(PollState::Ready(()));
    }

    if closed {
        return Err(StagehandError::PullRequestClosed { number });
    }

    Ok(PollState::Pending)
}

/// Opens release pull requests and waits for them to merge.
pub struct GithubPullRequests {
    remote: GithubRemote,
    base_branch: String,
    instance: Octocrab,
    poll: PollPolicy,
}

impl GithubPullRequests {
    pub fn new(
        remote: GithubRemote,
        base_branch: impl Into<String>,
        poll: PollPolicy,
    ) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(remote.token.clone())
            .base_uri(remote.api_base_uri())?
            .build()?;

        Ok(Self {
            remote,
            base_branch: base_branch.into(),
            instance,
            poll,
        })
    }

    async fn check_merged(&self, number: u64) -> Result<PollState<()>> {
        let pr = self
            .instance
            .pulls(&self.remote.owner, &self.remote.repo)
            .get(number)
            .await?;

        let merged = pr.merged.unwrap_or(false) || pr.merged_at.is_some();
        let closed = matches!(pr.state, Some(IssueState::Closed));

        merge_progress(number, merged, closed)
    }
}

#[async_trait]
impl PullRequestCreator for GithubPullRequests {
    async fn create_pull_request(
        &self,
        req: CreatePullRequest,
    ) -> Result<PullRequestHandle> {
        info!(
            "opening pull request {} -> {} on {}/{}",
            req.head_branch, self.base_branch, self.remote.owner, self.remote.repo
        );

        let pr = self
            .instance
            .pulls(&self.remote.owner, &self.remote.repo)
            .create(req.title, req.head_branch, self.base_branch.clone())
            .body(req.body)
            .send()
            .await?;

        Ok(PullRequestHandle {
            number: pr.number,
            project: req.project,
            url: pr.html_url.map(|u| u.to_string()),
        })
    }
}

#[async_trait]
impl PullRequestWatcher for GithubPullRequests {
    async fn wait_until_merged(&self, args: &WaitForMergeArgs) -> Result<()> {
        let number = args.pull_request;
        let what = format!("pull request #{number} on {}", args.project);

        self.poll
            .poll_until(&what, || self.check_merged(number))
            .await?;

        info!("{what} merged");

        Ok(())
    }
}

/// Stands in for GitHub when no repository is configured. Any pull request
/// operation fails with a configuration error.
pub struct UnconfiguredGithub;

#[async_trait]
impl PullRequestCreator for UnconfiguredGithub {
    async fn create_pull_request(
        &self,
        _req: CreatePullRequest,
    ) -> Result<PullRequestHandle> {
        Err(missing_repo())
    }
}

#[async_trait]
impl PullRequestWatcher for UnconfiguredGithub {
    async fn wait_until_merged(&self, _args: &WaitForMergeArgs) -> Result<()> {
        Err(missing_repo())
    }
}

fn missing_repo() -> StagehandError {
    StagehandError::invalid_config(
        "github.repo must be set to open or watch release pull requests",
    )
}
