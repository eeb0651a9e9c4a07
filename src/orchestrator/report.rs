use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

use crate::{
    capability::types::PullRequestHandle,
    config::release::ReleaseConfig,
};

/// Stages of a release run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    PromoteArtifacts,
    PromoteImages,
    TagImages,
    WaitForPullRequestMerge,
    WaitForCentralSync,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum StageStatus {
    Completed,
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    #[serde(flatten)]
    pub status: StageStatus,
}

/// Summary of a release run. Only produced for runs that reached the end;
/// a stage failure surfaces as an error instead.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    pub project: String,
    pub release_version: String,
    pub stages: Vec<StageRecord>,
    /// Configuration gaps that caused a stage to be skipped
    pub warnings: Vec<String>,
    pub pull_request: Option<PullRequestHandle>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ReleaseReport {
    pub fn new(config: &ReleaseConfig) -> Self {
        Self {
            project: config.project.clone(),
            release_version: config.release_version.clone(),
            stages: vec![],
            warnings: vec![],
            pull_request: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn completed(&mut self, stage: Stage) {
        self.stages.push(StageRecord {
            stage,
            status: StageStatus::Completed,
        });
    }

    pub fn skipped(&mut self, stage: Stage, reason: impl Into<String>) {
        self.stages.push(StageRecord {
            stage,
            status: StageStatus::Skipped {
                reason: reason.into(),
            },
        });
    }

    /// Records a skip caused by incomplete configuration.
    pub fn skipped_with_warning(&mut self, stage: Stage, reason: &str) {
        self.warnings.push(reason.to_string());
        self.skipped(stage, reason);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Stages that actually ran.
    pub fn completed_stages(&self) -> Vec<Stage> {
        self.stages
            .iter()
            .filter(|r| r.status == StageStatus::Completed)
            .map(|r| r.stage)
            .collect()
    }

    #[cfg(test)]
    pub fn was_skipped(&self, stage: Stage) -> bool {
        self.stages.iter().any(|r| {
            r.stage == stage && matches!(r.status, StageStatus::Skipped { .. })
        })
    }

    pub fn succeeded(&self) -> bool {
        self.finished_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_release_config;

    #[test]
    fn stage_names_are_kebab_case() {
        assert_eq!(Stage::PromoteArtifacts.to_string(), "promote-artifacts");
        assert_eq!(
            Stage::WaitForPullRequestMerge.to_string(),
            "wait-for-pull-request-merge"
        );
    }

    #[test]
    fn tracks_completed_and_skipped_stages() {
        let config = create_test_release_config("foo", "1.0.0");
        let mut report = ReleaseReport::new(&config);

        report.completed(Stage::PromoteArtifacts);
        report.skipped(Stage::TagImages, "no extra images to tag");
        report.skipped_with_warning(Stage::WaitForCentralSync, "no group id");

        assert_eq!(report.completed_stages(), vec![Stage::PromoteArtifacts]);
        assert!(report.was_skipped(Stage::TagImages));
        assert!(report.was_skipped(Stage::WaitForCentralSync));
        assert!(!report.was_skipped(Stage::PromoteArtifacts));
        assert_eq!(report.warnings, vec!["no group id"]);
        assert!(!report.succeeded());

        report.finish();
        assert!(report.succeeded());
    }

    #[test]
    fn serializes_stage_records() {
        let record = StageRecord {
            stage: Stage::TagImages,
            status: StageStatus::Skipped {
                reason: "nothing to tag".into(),
            },
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["stage"], "tag-images");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "nothing to tag");
    }
}
