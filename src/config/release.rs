use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{Result, config::promote::PromoteOptions, error::StagehandError};

/// Default repository polled for released artifacts.
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2/";
/// Default build container in which artifact promotion commands run.
pub const DEFAULT_CONTAINER_NAME: &str = "maven";

/// Returns true when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Raw `[release]` section as read from `stagehand.toml` before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct ReleaseSettings {
    /// Project (repository) name, e.g. "fabric8io/fabric8-maven-plugin"
    pub project: String,
    /// Version being released
    pub release_version: String,
    /// Staged repository ids to release, in order
    pub repo_ids: Vec<String>,
    /// Build container the promotion commands run in
    pub container_name: String,
    /// Docker organisation owning the images to promote
    pub docker_organisation: String,
    /// Destination registry for promoted images
    pub promote_to_docker_registry: String,
    /// Images to promote to the destination registry
    pub promote_docker_images: Vec<String>,
    /// Extra images to tag with the release version
    pub extra_images_to_tag: Vec<String>,
    /// Base URL of the repository to wait for artifact sync on
    pub repository_to_wait_for: String,
    /// Group id of the artifact to wait for
    pub group_id: String,
    /// Artifact id to wait for
    pub artifact_id_to_wait_for: String,
    /// Optional artifact file extension to wait for (default: jar)
    pub artifact_extension_to_wait_for: String,
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            project: String::new(),
            release_version: String::new(),
            repo_ids: vec![],
            container_name: DEFAULT_CONTAINER_NAME.into(),
            docker_organisation: String::new(),
            promote_to_docker_registry: String::new(),
            promote_docker_images: vec![],
            extra_images_to_tag: vec![],
            repository_to_wait_for: MAVEN_CENTRAL.into(),
            group_id: String::new(),
            artifact_id_to_wait_for: String::new(),
            artifact_extension_to_wait_for: String::new(),
        }
    }
}

impl ReleaseSettings {
    /// Validates the raw settings and produces an immutable [`ReleaseConfig`].
    pub fn into_release_config(
        self,
        promote: PromoteOptions,
    ) -> Result<ReleaseConfig> {
        ReleaseConfig::builder()
            .project(self.project)
            .release_version(self.release_version)
            .repo_ids(self.repo_ids)
            .container_name(self.container_name)
            .docker_organisation(self.docker_organisation)
            .promote_to_docker_registry(self.promote_to_docker_registry)
            .promote_docker_images(self.promote_docker_images)
            .extra_images_to_tag(self.extra_images_to_tag)
            .repository_to_wait_for(self.repository_to_wait_for)
            .group_id(self.group_id)
            .artifact_id_to_wait_for(self.artifact_id_to_wait_for)
            .artifact_extension_to_wait_for(
                self.artifact_extension_to_wait_for,
            )
            .promote(promote)
            .build()
    }
}

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct ReleaseConfigParams {
    pub project: String,
    pub release_version: String,
    #[builder(default)]
    pub repo_ids: Vec<String>,
    #[builder(default = "DEFAULT_CONTAINER_NAME.to_string()")]
    pub container_name: String,
    #[builder(default)]
    pub docker_organisation: String,
    #[builder(default)]
    pub promote_to_docker_registry: String,
    #[builder(default)]
    pub promote_docker_images: Vec<String>,
    #[builder(default)]
    pub extra_images_to_tag: Vec<String>,
    #[builder(default = "MAVEN_CENTRAL.to_string()")]
    pub repository_to_wait_for: String,
    #[builder(default)]
    pub group_id: String,
    #[builder(default)]
    pub artifact_id_to_wait_for: String,
    #[builder(default)]
    pub artifact_extension_to_wait_for: String,
    #[builder(default)]
    pub promote: PromoteOptions,
}

impl ReleaseConfigParamsBuilder {
    pub fn build(&self) -> Result<ReleaseConfig> {
        let params = self._build().map_err(|e| {
            StagehandError::invalid_config(format!(
                "Failed to build release config: {}",
                e
            ))
        })?;
        ReleaseConfig::new(params)
    }
}

/// Validated configuration for a single release run. Built once and shared
/// read-only by every stage of the run.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseConfig {
    pub project: String,
    pub release_version: String,
    pub repo_ids: Vec<String>,
    pub container_name: String,
    pub docker_organisation: String,
    pub promote_to_docker_registry: String,
    pub promote_docker_images: Vec<String>,
    pub extra_images_to_tag: Vec<String>,
    pub repository_to_wait_for: String,
    pub group_id: String,
    pub artifact_id_to_wait_for: String,
    pub artifact_extension_to_wait_for: String,
    pub promote: PromoteOptions,
}

impl ReleaseConfig {
    pub fn builder() -> ReleaseConfigParamsBuilder {
        ReleaseConfigParamsBuilder::default()
    }

    pub fn new(params: ReleaseConfigParams) -> Result<Self> {
        if is_blank(&params.project) {
            return Err(StagehandError::invalid_config(
                "project must not be empty",
            ));
        }

        if is_blank(&params.release_version) {
            return Err(StagehandError::invalid_config(
                "release_version must not be empty",
            ));
        }

        Ok(Self {
            project: params.project.trim().to_string(),
            release_version: params.release_version.trim().to_string(),
            repo_ids: params.repo_ids,
            container_name: params.container_name,
            docker_organisation: params.docker_organisation,
            promote_to_docker_registry: params.promote_to_docker_registry,
            promote_docker_images: params.promote_docker_images,
            extra_images_to_tag: params.extra_images_to_tag,
            repository_to_wait_for: params.repository_to_wait_for,
            group_id: params.group_id,
            artifact_id_to_wait_for: params.artifact_id_to_wait_for,
            artifact_extension_to_wait_for: params
                .artifact_extension_to_wait_for,
            promote: params.promote,
        })
    }
}
