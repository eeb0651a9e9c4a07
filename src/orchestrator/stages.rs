//! Derivation of per-stage arguments from a [`ReleaseConfig`].
//!
//! Each optional stage gets a [`Derived`] value: ready to run, not requested
//! at all, or requested but missing configuration it needs.
use crate::{
    capability::types::{
        PromoteArtifactsArgs, PromoteImagesArgs, PullRequestHandle,
        TagImagesArgs, WaitForMergeArgs, WaitForSyncArgs,
    },
    config::release::{ReleaseConfig, is_blank},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived<T> {
    Ready(T),
    NotRequested,
    /// The stage was asked for but cannot run; holds the reason
    Incomplete(String),
}

#[cfg(test)]
impl<T> Derived<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Derived::Ready(args) => Some(args),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Derived::Ready(_))
    }
}

/// Arguments for every stage of a run, derived once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStageArgs {
    pub promote_artifacts: PromoteArtifactsArgs,
    pub promote_images: Derived<PromoteImagesArgs>,
    pub tag_images: Derived<TagImagesArgs>,
    pub wait_for_sync: Derived<WaitForSyncArgs>,
}

impl DerivedStageArgs {
    pub fn derive(config: &ReleaseConfig) -> Self {
        Self {
            promote_artifacts: promote_artifacts_args(config),
            promote_images: promote_images_args(config),
            tag_images: tag_images_args(config),
            wait_for_sync: wait_for_sync_args(config),
        }
    }
}

pub fn promote_artifacts_args(config: &ReleaseConfig) -> PromoteArtifactsArgs {
    PromoteArtifactsArgs {
        project: config.project.clone(),
        version: config.release_version.clone(),
        repo_ids: config.repo_ids.clone(),
        container_name: config.container_name.clone(),
        helm_push: config.promote.helm_push,
        update_next_development_version: config
            .promote
            .update_next_development_version,
        update_next_development_version_arguments: config
            .promote
            .update_next_development_version_arguments
            .clone(),
    }
}

pub fn promote_images_args(config: &ReleaseConfig) -> Derived<PromoteImagesArgs> {
    let images = &config.promote_docker_images;

    if images.is_empty() {
        return Derived::NotRequested;
    }

    if is_blank(&config.docker_organisation) {
        return Derived::Incomplete(format!(
            "cannot promote images {:?}: docker_organisation is not set",
            images
        ));
    }

    if is_blank(&config.promote_to_docker_registry) {
        return Derived::Incomplete(format!(
            "cannot promote images {:?}: promote_to_docker_registry is not set",
            images
        ));
    }

    Derived::Ready(PromoteImagesArgs {
        version: config.release_version.clone(),
        organisation: config.docker_organisation.clone(),
        registry: config.promote_to_docker_registry.clone(),
        images: images.clone(),
    })
}

pub fn tag_images_args(config: &ReleaseConfig) -> Derived<TagImagesArgs> {
    if config.extra_images_to_tag.is_empty() {
        return Derived::NotRequested;
    }

    Derived::Ready(TagImagesArgs {
        version: config.release_version.clone(),
        images: config.extra_images_to_tag.clone(),
    })
}

pub fn wait_for_merge_args(
    config: &ReleaseConfig,
    pull_request: &PullRequestHandle,
) -> WaitForMergeArgs {
    WaitForMergeArgs {
        pull_request: pull_request.number,
        project: config.project.clone(),
    }
}

pub fn wait_for_sync_args(config: &ReleaseConfig) -> Derived<WaitForSyncArgs> {
    if is_blank(&config.group_id) || is_blank(&config.artifact_id_to_wait_for)
    {
        return Derived::Incomplete(format!(
            "cannot wait for artifacts to sync to the central repository: group_id and artifact_id_to_wait_for are required (group_id: {:?}, artifact_id_to_wait_for: {:?})",
            config.group_id, config.artifact_id_to_wait_for
        ));
    }

    let non_blank = |value: &str| {
        if is_blank(value) {
            None
        } else {
            Some(value.trim().to_string())
        }
    };

    Derived::Ready(WaitForSyncArgs {
        group_id: config.group_id.trim().to_string(),
        artifact_id: config.artifact_id_to_wait_for.trim().to_string(),
        version: config.release_version.clone(),
        ext: non_blank(&config.artifact_extension_to_wait_for),
        repo: non_blank(&config.repository_to_wait_for),
    })
}
