//! Tests for release workflow.
//!
//! Tests for:
//! - execute / run sequencing across all stages
//! - Skipping stages that are not requested
//! - Warnings for incomplete docker and central sync configuration
//! - Hard failures aborting the remaining stages

use mockall::Sequence;

use super::common::*;
use crate::{
    capability::types::PullRequestHandle,
    config::{promote::PromoteOptions, release::ReleaseConfig},
    error::StagehandError,
    orchestrator::report::Stage,
    test_helpers::{MockCapabilities, create_bump_promote_options},
};

#[tokio::test]
async fn only_promotes_artifacts_when_nothing_else_is_configured() {
    let mut mocks = MockCapabilities::default();
    let mut seq = Sequence::new();

    mocks
        .staging
        .expect_release()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|repo_id, _| repo_id == "r1")
        .returning(|_, _| Ok(()));
    mocks
        .staging
        .expect_release()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|repo_id, _| repo_id == "r2")
        .returning(|_, _| Ok(()));

    // Should NOT touch any other collaborator
    mocks.image_promoter.expect_promote_images().times(0);
    mocks.image_tagger.expect_tag_images().times(0);
    mocks.merge_watcher.expect_wait_until_merged().times(0);
    mocks.sync_watcher.expect_wait_until_synced().times(0);
    mocks.pull_requests.expect_create_pull_request().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .repo_ids(strings(&["r1", "r2"]))
        .promote_docker_images(Vec::<String>::new())
        .group_id("")
        .artifact_id_to_wait_for("")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.succeeded());
    assert_eq!(report.completed_stages(), vec![Stage::PromoteArtifacts]);
    assert!(report.was_skipped(Stage::PromoteImages));
    assert!(report.was_skipped(Stage::TagImages));
    assert!(report.was_skipped(Stage::WaitForPullRequestMerge));
    assert!(report.was_skipped(Stage::WaitForCentralSync));
    assert!(report.pull_request.is_none());
}

#[tokio::test]
async fn run_returns_true_on_success() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .repo_ids(strings(&["r1"]))
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);

    assert!(orchestrator.run().await.unwrap());
}

#[test_log::test(tokio::test)]
async fn skips_image_promotion_with_warning_when_organisation_blank() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks.image_promoter.expect_promote_images().times(0);

    // Other eligible stages still run
    mocks
        .image_tagger
        .expect_tag_images()
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .sync_watcher
        .expect_wait_until_synced()
        .times(1)
        .returning(|_| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .promote_docker_images(strings(&["img1"]))
        .docker_organisation("")
        .promote_to_docker_registry("reg")
        .extra_images_to_tag(strings(&["fabric8/extra"]))
        .group_id("io.example")
        .artifact_id_to_wait_for("foo-core")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.succeeded());
    assert!(report.was_skipped(Stage::PromoteImages));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("docker_organisation"));
    assert_eq!(
        report.completed_stages(),
        vec![
            Stage::PromoteArtifacts,
            Stage::TagImages,
            Stage::WaitForCentralSync
        ]
    );
}

#[tokio::test]
async fn skips_image_promotion_with_warning_when_registry_blank() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks.image_promoter.expect_promote_images().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .promote_docker_images(strings(&["img1"]))
        .docker_organisation("fabric8")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.was_skipped(Stage::PromoteImages));
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("promote_to_docker_registry"))
    );
}

#[tokio::test]
async fn promotes_images_with_release_version() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks
        .image_promoter
        .expect_promote_images()
        .times(1)
        .withf(|args| {
            args.version == TEST_VERSION
                && args.organisation == "fabric8"
                && args.registry == "registry.example.com"
                && args.images == vec!["console".to_string()]
        })
        .returning(|_| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .promote_docker_images(strings(&["console"]))
        .docker_organisation("fabric8")
        .promote_to_docker_registry("registry.example.com")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.completed_stages().contains(&Stage::PromoteImages));
}

#[tokio::test]
async fn tags_exactly_the_extra_images() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks
        .image_tagger
        .expect_tag_images()
        .times(1)
        .withf(|args| {
            args.version == TEST_VERSION
                && args.images
                    == vec!["fabric8/a".to_string(), "fabric8/b".to_string()]
        })
        .returning(|_| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .extra_images_to_tag(strings(&["fabric8/a", "fabric8/b"]))
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.completed_stages().contains(&Stage::TagImages));
}

#[tokio::test]
async fn waits_for_pull_request_created_by_promotion() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks
        .versions
        .expect_update_next_development_version()
        .times(1)
        .returning(|_, _, _| Ok(()));
    mocks
        .pull_requests
        .expect_create_pull_request()
        .times(1)
        .returning(|_| Ok(test_pull_request(42)));
    mocks
        .merge_watcher
        .expect_wait_until_merged()
        .times(1)
        .withf(|args| args.pull_request == 42 && args.project == TEST_PROJECT)
        .returning(|_| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .repo_ids(strings(&["r1"]))
        .promote(create_bump_promote_options())
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(
        report
            .completed_stages()
            .contains(&Stage::WaitForPullRequestMerge)
    );
    assert_eq!(report.pull_request.map(|pr| pr.number), Some(42));
}

#[tokio::test]
async fn never_waits_for_merge_without_pull_request() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks.merge_watcher.expect_wait_until_merged().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .repo_ids(strings(&["r1"]))
        .promote(PromoteOptions::default())
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.was_skipped(Stage::WaitForPullRequestMerge));
}

#[tokio::test]
async fn skips_central_sync_with_warning_when_group_id_blank() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks.sync_watcher.expect_wait_until_synced().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .group_id("  ")
        .artifact_id_to_wait_for("foo-core")
        .artifact_extension_to_wait_for("pom")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert!(report.succeeded());
    assert!(report.was_skipped(Stage::WaitForCentralSync));
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("central repository"))
    );
}

#[tokio::test]
async fn runs_every_stage_in_order() {
    let mut mocks = MockCapabilities::default();
    let mut seq = Sequence::new();

    mocks
        .staging
        .expect_release()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    mocks
        .versions
        .expect_update_next_development_version()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    mocks
        .pull_requests
        .expect_create_pull_request()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|req| {
            Ok(PullRequestHandle {
                number: 9,
                project: req.project,
                url: None,
            })
        });
    mocks
        .image_promoter
        .expect_promote_images()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mocks
        .image_tagger
        .expect_tag_images()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mocks
        .merge_watcher
        .expect_wait_until_merged()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mocks
        .sync_watcher
        .expect_wait_until_synced()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|args| {
            args.group_id == "io.example"
                && args.artifact_id == "foo-core"
                && args.version == TEST_VERSION
        })
        .returning(|_| Ok(()));

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .repo_ids(strings(&["r1"]))
        .promote_docker_images(strings(&["console"]))
        .docker_organisation("fabric8")
        .promote_to_docker_registry("reg")
        .extra_images_to_tag(strings(&["fabric8/extra"]))
        .group_id("io.example")
        .artifact_id_to_wait_for("foo-core")
        .promote(create_bump_promote_options())
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let report = orchestrator.execute().await.unwrap();

    assert_eq!(
        report.completed_stages(),
        vec![
            Stage::PromoteArtifacts,
            Stage::PromoteImages,
            Stage::TagImages,
            Stage::WaitForPullRequestMerge,
            Stage::WaitForCentralSync,
        ]
    );
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn stage_failure_aborts_remaining_stages() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks
        .image_promoter
        .expect_promote_images()
        .times(1)
        .returning(|_| {
            Err(StagehandError::command_failed(
                "docker push reg/fabric8/console:1.2.3",
                Some(1),
                "denied",
            ))
        });
    mocks.image_tagger.expect_tag_images().times(0);
    mocks.sync_watcher.expect_wait_until_synced().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .promote_docker_images(strings(&["console"]))
        .docker_organisation("fabric8")
        .promote_to_docker_registry("reg")
        .extra_images_to_tag(strings(&["fabric8/extra"]))
        .group_id("io.example")
        .artifact_id_to_wait_for("foo-core")
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(StagehandError::CommandFailed { .. })));
}

#[tokio::test]
async fn closed_pull_request_fails_the_release() {
    let mut mocks = MockCapabilities::default();
    mocks.staging.expect_release().returning(|_, _| Ok(()));
    mocks
        .versions
        .expect_update_next_development_version()
        .returning(|_, _, _| Ok(()));
    mocks
        .pull_requests
        .expect_create_pull_request()
        .returning(|_| Ok(test_pull_request(3)));
    mocks
        .merge_watcher
        .expect_wait_until_merged()
        .returning(|args| {
            Err(StagehandError::PullRequestClosed {
                number: args.pull_request,
            })
        });
    mocks.sync_watcher.expect_wait_until_synced().times(0);

    let config = ReleaseConfig::builder()
        .project(TEST_PROJECT)
        .release_version(TEST_VERSION)
        .group_id("io.example")
        .artifact_id_to_wait_for("foo-core")
        .promote(create_bump_promote_options())
        .build()
        .unwrap();

    let orchestrator = create_test_orchestrator(mocks, config);
    let result = orchestrator.execute().await;

    assert!(matches!(
        result,
        Err(StagehandError::PullRequestClosed { number: 3 })
    ));
}

#[tokio::test]
async fn release_config_validation_happens_before_run() {
    let result = ReleaseConfig::builder()
        .project("")
        .release_version(TEST_VERSION)
        .build();

    assert!(matches!(result, Err(StagehandError::InvalidConfig(_))));

    let config = create_test_release_config(TEST_PROJECT, TEST_VERSION);
    assert_eq!(config.project, TEST_PROJECT);
}
