use derive_builder::Builder;
use log::*;
use std::rc::Rc;

use crate::{
    Result,
    capability::manager::CapabilityManager,
    config::release::ReleaseConfig,
    error::StagehandError,
    orchestrator::{
        promote::ArtifactPromoter,
        report::{ReleaseReport, Stage},
        stages::{Derived, DerivedStageArgs, wait_for_merge_args},
    },
};

pub mod promote;
pub mod report;
pub mod site;
pub mod stages;

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub config: Rc<ReleaseConfig>,
    pub capabilities: Rc<CapabilityManager>,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<ReleaseOrchestrator> {
        let params = self._build().map_err(|e| {
            StagehandError::invalid_config(format!(
                "Failed to build release orchestrator: {}",
                e
            ))
        })?;
        Ok(ReleaseOrchestrator::new(params))
    }
}

/// Runs the release stages of a project strictly in sequence:
///
/// 1. promote artifacts (always)
/// 2. promote docker images
/// 3. tag extra docker images
/// 4. wait for the release pull request to merge
/// 5. wait for the artifact to sync to the central repository
///
/// Stages 2-5 are skipped when their arguments cannot be derived. A stage
/// error aborts the run and is returned to the caller.
pub struct ReleaseOrchestrator {
    config: Rc<ReleaseConfig>,
    capabilities: Rc<CapabilityManager>,
    promoter: ArtifactPromoter,
}

impl ReleaseOrchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        Self {
            promoter: ArtifactPromoter::new(Rc::clone(&params.capabilities)),
            config: params.config,
            capabilities: params.capabilities,
        }
    }

    /// Runs every stage and reports whether the release completed.
    pub async fn run(&self) -> Result<bool> {
        let report = self.execute().await?;
        Ok(report.succeeded())
    }

    /// Runs every stage and returns a record of what ran and what was
    /// skipped.
    pub async fn execute(&self) -> Result<ReleaseReport> {
        let config = self.config.as_ref();
        let args = DerivedStageArgs::derive(config);
        let mut report = ReleaseReport::new(config);

        info!(
            "releasing {} version {}",
            config.project, config.release_version
        );

        let pull_request = self
            .promoter
            .apply(&args.promote_artifacts)
            .await
            .inspect_err(|e| log_stage_failure(Stage::PromoteArtifacts, e))?;
        report.completed(Stage::PromoteArtifacts);

        match args.promote_images {
            Derived::Ready(promote_args) => {
                self.capabilities
                    .promote_images(&promote_args)
                    .await
                    .inspect_err(|e| {
                        log_stage_failure(Stage::PromoteImages, e)
                    })?;
                report.completed(Stage::PromoteImages);
            }
            Derived::NotRequested => {
                report.skipped(Stage::PromoteImages, "no images to promote");
            }
            Derived::Incomplete(reason) => {
                warn!("{reason}");
                report.skipped_with_warning(Stage::PromoteImages, &reason);
            }
        }

        match args.tag_images {
            Derived::Ready(tag_args) => {
                self.capabilities
                    .tag_images(&tag_args)
                    .await
                    .inspect_err(|e| log_stage_failure(Stage::TagImages, e))?;
                report.completed(Stage::TagImages);
            }
            _ => report.skipped(Stage::TagImages, "no extra images to tag"),
        }

        if let Some(pr) = pull_request.as_ref() {
            let merge_args = wait_for_merge_args(config, pr);
            info!(
                "waiting for pull request #{} on {} to merge",
                merge_args.pull_request, merge_args.project
            );
            self.capabilities
                .wait_until_merged(&merge_args)
                .await
                .inspect_err(|e| {
                    log_stage_failure(Stage::WaitForPullRequestMerge, e)
                })?;
            report.completed(Stage::WaitForPullRequestMerge);
        } else {
            report.skipped(
                Stage::WaitForPullRequestMerge,
                "no release pull request was created",
            );
        }
        report.pull_request = pull_request;

        match args.wait_for_sync {
            Derived::Ready(sync_args) => {
                info!(
                    "waiting for {}:{}:{} to sync",
                    sync_args.group_id, sync_args.artifact_id, sync_args.version
                );
                self.capabilities
                    .wait_until_synced(&sync_args)
                    .await
                    .inspect_err(|e| {
                        log_stage_failure(Stage::WaitForCentralSync, e)
                    })?;
                report.completed(Stage::WaitForCentralSync);
            }
            Derived::Incomplete(reason) => {
                warn!("{reason}");
                report.skipped_with_warning(Stage::WaitForCentralSync, &reason);
            }
            Derived::NotRequested => {
                report.skipped(Stage::WaitForCentralSync, "not requested");
            }
        }

        report.finish();

        info!(
            "released {} version {}",
            config.project, config.release_version
        );

        Ok(report)
    }
}

fn log_stage_failure(stage: Stage, err: &StagehandError) {
    error!("stage {stage} failed: {err}");
}
