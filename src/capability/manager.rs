//! Manager that bundles the capability implementations used by a run
use derive_builder::Builder;
use log::*;
use std::sync::Arc;

use crate::{
    Result,
    capability::{
        traits::{
            ArtifactSyncWatcher, ChartPublisher, ImagePromoter, ImageTagger,
            PullRequestCreator, PullRequestWatcher, ServiceDiscovery,
            SiteDeployer, StagingRepository, VersionBumper,
        },
        types::{
            CreatePullRequest, PromoteImagesArgs, PullRequestHandle,
            TagImagesArgs, WaitForMergeArgs, WaitForSyncArgs,
        },
    },
    error::StagehandError,
};

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct CapabilityParams {
    pub service_discovery: Arc<dyn ServiceDiscovery>,
    pub staging: Arc<dyn StagingRepository>,
    pub charts: Arc<dyn ChartPublisher>,
    pub versions: Arc<dyn VersionBumper>,
    pub pull_requests: Arc<dyn PullRequestCreator>,
    pub image_promoter: Arc<dyn ImagePromoter>,
    pub image_tagger: Arc<dyn ImageTagger>,
    pub merge_watcher: Arc<dyn PullRequestWatcher>,
    pub sync_watcher: Arc<dyn ArtifactSyncWatcher>,
    pub site: Arc<dyn SiteDeployer>,
    #[builder(default)]
    pub dry_run: bool,
}

impl CapabilityParamsBuilder {
    pub fn build(self) -> Result<CapabilityManager> {
        let params = self._build().map_err(|e| {
            StagehandError::invalid_config(format!(
                "Failed to build capability manager: {}",
                e
            ))
        })?;
        Ok(CapabilityManager::new(params))
    }
}

/// Dispatches stage calls to the configured collaborators. In dry-run mode
/// every call that changes remote state or blocks on a remote condition is
/// logged and skipped; read-only lookups still run.
pub struct CapabilityManager {
    service_discovery: Arc<dyn ServiceDiscovery>,
    staging: Arc<dyn StagingRepository>,
    charts: Arc<dyn ChartPublisher>,
    versions: Arc<dyn VersionBumper>,
    pull_requests: Arc<dyn PullRequestCreator>,
    image_promoter: Arc<dyn ImagePromoter>,
    image_tagger: Arc<dyn ImageTagger>,
    merge_watcher: Arc<dyn PullRequestWatcher>,
    sync_watcher: Arc<dyn ArtifactSyncWatcher>,
    site: Arc<dyn SiteDeployer>,
    dry_run: bool,
}

impl CapabilityManager {
    pub fn builder() -> CapabilityParamsBuilder {
        CapabilityParamsBuilder::default()
    }

    pub fn new(params: CapabilityParams) -> Self {
        Self {
            service_discovery: params.service_discovery,
            staging: params.staging,
            charts: params.charts,
            versions: params.versions,
            pull_requests: params.pull_requests,
            image_promoter: params.image_promoter,
            image_tagger: params.image_tagger,
            merge_watcher: params.merge_watcher,
            sync_watcher: params.sync_watcher,
            site: params.site,
            dry_run: params.dry_run,
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn has_service(&self, name: &str) -> Result<bool> {
        self.service_discovery.has_service(name).await
    }

    pub async fn release_staged_repository(
        &self,
        repo_id: &str,
        container: &str,
    ) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would release staging repository: {repo_id}");
            return Ok(());
        }
        self.staging.release(repo_id, container).await
    }

    pub async fn push_chart(&self, container: &str) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would push helm chart");
            return Ok(());
        }
        self.charts.push_chart(container).await
    }

    pub async fn update_next_development_version(
        &self,
        release_version: &str,
        extra_args: &str,
        container: &str,
    ) -> Result<()> {
        if self.dry_run {
            warn!(
                "dry_run: would update to next development version: release_version: {release_version}, args: {extra_args}"
            );
            return Ok(());
        }
        self.versions
            .update_next_development_version(
                release_version,
                extra_args,
                container,
            )
            .await
    }

    pub async fn create_pull_request(
        &self,
        req: CreatePullRequest,
    ) -> Result<PullRequestHandle> {
        if self.dry_run {
            warn!("dry_run: would create pull request: req: {:#?}", req);
            return Ok(PullRequestHandle {
                number: 0,
                project: req.project,
                url: None,
            });
        }
        self.pull_requests.create_pull_request(req).await
    }

    pub async fn promote_images(&self, args: &PromoteImagesArgs) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would promote images: args: {:#?}", args);
            return Ok(());
        }
        self.image_promoter.promote_images(args).await
    }

    pub async fn tag_images(&self, args: &TagImagesArgs) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would tag images: args: {:#?}", args);
            return Ok(());
        }
        self.image_tagger.tag_images(args).await
    }

    pub async fn wait_until_merged(&self, args: &WaitForMergeArgs) -> Result<()> {
        if self.dry_run {
            warn!(
                "dry_run: would wait for pull request #{} on {} to merge",
                args.pull_request, args.project
            );
            return Ok(());
        }
        self.merge_watcher.wait_until_merged(args).await
    }

    pub async fn wait_until_synced(&self, args: &WaitForSyncArgs) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would wait for artifact sync: args: {:#?}", args);
            return Ok(());
        }
        self.sync_watcher.wait_until_synced(args).await
    }

    pub async fn deploy_site(&self) -> Result<()> {
        if self.dry_run {
            warn!("dry_run: would deploy maven site");
            return Ok(());
        }
        self.site.deploy_site().await
    }
}
