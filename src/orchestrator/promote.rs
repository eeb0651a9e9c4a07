//! Promotes staged artifacts: releases each staging repository, optionally
//! pushes the chart and opens the next development version pull request.
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    capability::{
        manager::CapabilityManager,
        types::{CreatePullRequest, PromoteArtifactsArgs, PullRequestHandle},
    },
};

/// Branch the next development version is pushed to.
pub fn release_branch(version: &str) -> String {
    format!("release-v{version}")
}

/// Title of the next development version pull request.
pub fn release_pr_title(version: &str) -> String {
    format!("[CD] Release {version}")
}

pub struct ArtifactPromoter {
    capabilities: Rc<CapabilityManager>,
}

impl ArtifactPromoter {
    pub fn new(capabilities: Rc<CapabilityManager>) -> Self {
        Self { capabilities }
    }

    /// Releases `repo_ids` strictly in order; the first failure aborts the
    /// stage. Returns the pull request opened for the next development
    /// version, if that option is enabled.
    pub async fn apply(
        &self,
        args: &PromoteArtifactsArgs,
    ) -> Result<Option<PullRequestHandle>> {
        let container = args.container_name.as_str();

        info!(
            "about to release {} repo ids {:?} (container: {})",
            args.project, args.repo_ids, container
        );

        for repo_id in args.repo_ids.iter() {
            info!("releasing staging repository: {repo_id}");
            self.capabilities
                .release_staged_repository(repo_id, container)
                .await?;
        }

        if args.helm_push {
            info!("pushing helm chart for {}", args.project);
            self.capabilities.push_chart(container).await?;
        }

        if !args.update_next_development_version {
            debug!("next development version update disabled");
            return Ok(None);
        }

        self.capabilities
            .update_next_development_version(
                &args.version,
                &args.update_next_development_version_arguments,
                container,
            )
            .await?;

        let req = CreatePullRequest {
            title: release_pr_title(&args.version),
            project: args.project.clone(),
            head_branch: release_branch(&args.version),
            body: format!(
                "Release {} of {} and prepare for the next development iteration",
                args.version, args.project
            ),
        };

        let pr = self.capabilities.create_pull_request(req).await?;

        info!("created release pull request #{} on {}", pr.number, pr.project);

        Ok(Some(pr))
    }
}
