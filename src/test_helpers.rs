//! Common test helper functions shared across test modules.
//!
//! Provides a bundle of capability mocks that can be configured field by
//! field and turned into a [`CapabilityManager`]. Any mock left without
//! expectations panics when called, which is how tests assert that a stage
//! never ran.
use std::sync::Arc;

use crate::{
    capability::{
        manager::CapabilityManager,
        traits::{
            MockArtifactSyncWatcher, MockChartPublisher, MockImagePromoter,
            MockImageTagger, MockPullRequestCreator, MockPullRequestWatcher,
            MockServiceDiscovery, MockSiteDeployer, MockStagingRepository,
            MockVersionBumper,
        },
    },
    config::{promote::PromoteOptions, release::ReleaseConfig},
};

#[derive(Default)]
pub struct MockCapabilities {
    pub service_discovery: MockServiceDiscovery,
    pub staging: MockStagingRepository,
    pub charts: MockChartPublisher,
    pub versions: MockVersionBumper,
    pub pull_requests: MockPullRequestCreator,
    pub image_promoter: MockImagePromoter,
    pub image_tagger: MockImageTagger,
    pub merge_watcher: MockPullRequestWatcher,
    pub sync_watcher: MockArtifactSyncWatcher,
    pub site: MockSiteDeployer,
}

impl MockCapabilities {
    pub fn into_manager(self) -> CapabilityManager {
        self.build(false)
    }

    pub fn into_dry_run_manager(self) -> CapabilityManager {
        self.build(true)
    }

    fn build(self, dry_run: bool) -> CapabilityManager {
        CapabilityManager::builder()
            .service_discovery(Arc::new(self.service_discovery))
            .staging(Arc::new(self.staging))
            .charts(Arc::new(self.charts))
            .versions(Arc::new(self.versions))
            .pull_requests(Arc::new(self.pull_requests))
            .image_promoter(Arc::new(self.image_promoter))
            .image_tagger(Arc::new(self.image_tagger))
            .merge_watcher(Arc::new(self.merge_watcher))
            .sync_watcher(Arc::new(self.sync_watcher))
            .site(Arc::new(self.site))
            .dry_run(dry_run)
            .build()
            .unwrap()
    }
}

/// Creates a release config with only the required fields set.
///
/// # Example
/// ```ignore
/// let config = create_test_release_config("foo", "1.2.3");
/// ```
pub fn create_test_release_config(
    project: &str,
    release_version: &str,
) -> ReleaseConfig {
    ReleaseConfig::builder()
        .project(project)
        .release_version(release_version)
        .build()
        .unwrap()
}

/// Creates promote options with version bump enabled.
pub fn create_bump_promote_options() -> PromoteOptions {
    PromoteOptions {
        update_next_development_version: true,
        ..PromoteOptions::default()
    }
}

/// Converts string slices into owned strings.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
