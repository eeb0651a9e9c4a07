//! Common test utilities for orchestrator tests.

use std::rc::Rc;

use crate::{
    capability::types::PullRequestHandle,
    config::release::ReleaseConfig,
    orchestrator::{
        OrchestratorParams, ReleaseOrchestrator, promote::ArtifactPromoter,
        site::SiteDeployment,
    },
    test_helpers::MockCapabilities,
};

pub use crate::test_helpers::{create_test_release_config, strings};

pub const TEST_PROJECT: &str = "foo";
pub const TEST_VERSION: &str = "1.2.3";

/// Creates a test ReleaseOrchestrator from configured mocks.
/// Set expectations on the mocks before calling this.
///
/// # Example
/// ```ignore
/// let mut mocks = MockCapabilities::default();
/// mocks.staging.expect_release().returning(|_, _| Ok(()));
/// let orchestrator = create_test_orchestrator(mocks, config);
/// ```
pub fn create_test_orchestrator(
    mocks: MockCapabilities,
    config: ReleaseConfig,
) -> ReleaseOrchestrator {
    ReleaseOrchestrator::new(OrchestratorParams {
        config: Rc::new(config),
        capabilities: Rc::new(mocks.into_manager()),
    })
}

pub fn create_test_promoter(mocks: MockCapabilities) -> ArtifactPromoter {
    ArtifactPromoter::new(Rc::new(mocks.into_manager()))
}

pub fn create_test_site_deployment(mocks: MockCapabilities) -> SiteDeployment {
    SiteDeployment::new(Rc::new(mocks.into_manager()))
}

pub fn test_pull_request(number: u64) -> PullRequestHandle {
    PullRequestHandle {
        number,
        project: TEST_PROJECT.into(),
        url: Some(format!(
            "https://github.com/example/{TEST_PROJECT}/pull/{number}"
        )),
    }
}
