//! Waits for released artifacts to become downloadable from a maven
//! repository.
use async_trait::async_trait;
use log::*;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use crate::{
    Result,
    adapter::poll::{PollPolicy, PollState},
    capability::{traits::ArtifactSyncWatcher, types::WaitForSyncArgs},
    config::release::MAVEN_CENTRAL,
    error::StagehandError,
};

const DEFAULT_EXTENSION: &str = "jar";
/// Upper bound for a single `HEAD` request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the download URL of the artifact described by `args`.
pub fn artifact_url(args: &WaitForSyncArgs) -> Result<Url> {
    let repo = args.repo.as_deref().unwrap_or(MAVEN_CENTRAL);
    let ext = args.ext.as_deref().unwrap_or(DEFAULT_EXTENSION);
    let artifact = &args.artifact_id;
    let version = &args.version;

    let url = format!(
        "{}/{}/{artifact}/{version}/{artifact}-{version}.{ext}",
        repo.trim_end_matches('/'),
        args.group_id.replace('.', "/"),
    );

    Ok(Url::parse(&url)?)
}

/// Maps the status of a `HEAD` request onto a poll result. Only a missing
/// artifact keeps the watcher polling.
pub fn sync_progress(url: &Url, status: StatusCode) -> Result<PollState<()>> {
    if status.is_success() {
        return Ok(PollState::Ready(()));
    }

    if status == StatusCode::NOT_FOUND {
        return Ok(PollState::Pending);
    }

    Err(StagehandError::NetworkError(format!(
        "HEAD {url} returned {status}"
    )))
}

pub struct HttpArtifactSyncWatcher {
    client: reqwest::Client,
    poll: PollPolicy,
}

impl HttpArtifactSyncWatcher {
    pub fn new(poll: PollPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, poll })
    }

    async fn check(&self, url: &Url) -> Result<PollState<()>> {
        let response = self.client.head(url.clone()).send().await?;
        sync_progress(url, response.status())
    }
}

#[async_trait]
impl ArtifactSyncWatcher for HttpArtifactSyncWatcher {
    async fn wait_until_synced(&self, args: &WaitForSyncArgs) -> Result<()> {
        let url = artifact_url(args)?;
        let what = format!(
            "{}:{}:{} at {url}",
            args.group_id, args.artifact_id, args.version
        );

        info!("waiting for {what}");

        self.poll.poll_until(&what, || self.check(&url)).await?;

        info!("{what} is available");

        Ok(())
    }
}
