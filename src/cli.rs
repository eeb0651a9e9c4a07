//! CLI argument parsing and overrides applied onto the file configuration.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    Config, promote::PromoteOptions, release::ReleaseSettings, site::SiteConfig,
};

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Path to the configuration file. Defaults to ./stagehand.toml.
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Log mutating operations instead of performing them.
    pub dry_run: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Promote artifacts and images, then wait for the release to land.
    Release {
        #[command(flatten)]
        release: ReleaseArgs,

        #[command(flatten)]
        promote: PromoteArgs,

        #[arg(long, default_value_t = false)]
        /// Print the run report as JSON.
        json: bool,
    },

    /// Release staged repositories and optionally open the next development
    /// version pull request.
    PromoteArtifacts {
        #[command(flatten)]
        artifacts: ArtifactArgs,

        #[command(flatten)]
        promote: PromoteArgs,
    },

    /// Deploy the maven site when the content repository service exists.
    DeploySite(SiteArgs),
}

/// Project and staging repository selection.
#[derive(clap::Args, Debug, Default)]
pub struct ArtifactArgs {
    #[arg(long)]
    /// Project (repository) being released.
    pub project: Option<String>,

    #[arg(long)]
    /// Version being released.
    pub release_version: Option<String>,

    #[arg(long = "repo-id")]
    /// Staged repository id to release. Repeat for several, in order.
    pub repo_ids: Vec<String>,

    #[arg(long)]
    /// Build container the promotion commands run in.
    pub container_name: Option<String>,
}

/// Docker and central sync settings of a full release.
#[derive(clap::Args, Debug, Default)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[arg(long)]
    /// Docker organisation owning the images to promote.
    pub docker_organisation: Option<String>,

    #[arg(long)]
    /// Registry the images are promoted to.
    pub promote_to_docker_registry: Option<String>,

    #[arg(long = "promote-docker-image")]
    /// Image to promote. Repeat for several.
    pub promote_docker_images: Vec<String>,

    #[arg(long = "extra-image-to-tag")]
    /// Image to tag with the release version. Repeat for several.
    pub extra_images_to_tag: Vec<String>,

    #[arg(long)]
    /// Base URL of the repository to wait for artifact sync on.
    pub repository_to_wait_for: Option<String>,

    #[arg(long)]
    /// Group id of the artifact to wait for.
    pub group_id: Option<String>,

    #[arg(long)]
    /// Artifact id to wait for.
    pub artifact_id_to_wait_for: Option<String>,

    #[arg(long)]
    /// Extension of the artifact to wait for (default: jar).
    pub artifact_extension_to_wait_for: Option<String>,
}

/// Artifact promotion options.
#[derive(clap::Args, Debug, Default)]
pub struct PromoteArgs {
    #[arg(long, default_value_t = false)]
    /// Push the helm chart after releasing the staged repositories.
    pub helm_push: bool,

    #[arg(long, default_value_t = false)]
    /// Open a pull request moving the project to its next snapshot version.
    pub update_next_development_version: bool,

    #[arg(long)]
    /// Extra arguments for the maven versions:set invocation.
    pub update_next_development_version_arguments: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub struct SiteArgs {
    #[arg(long)]
    /// Name of the content repository service.
    pub service_name: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Do not deploy the maven site.
    pub skip_content_repository: bool,
}

impl Args {
    /// Applies the flags of the selected subcommand onto `config`.
    pub fn apply(&self, config: &mut Config) {
        match &self.command {
            Command::Release {
                release, promote, ..
            } => {
                release.apply(&mut config.release);
                promote.apply(&mut config.promote);
            }
            Command::PromoteArtifacts { artifacts, promote } => {
                artifacts.apply(&mut config.release);
                promote.apply(&mut config.promote);
            }
            Command::DeploySite(site) => site.apply(&mut config.site),
        }
    }
}

impl ArtifactArgs {
    pub fn apply(&self, settings: &mut ReleaseSettings) {
        override_string(&mut settings.project, &self.project);
        override_string(&mut settings.release_version, &self.release_version);
        override_list(&mut settings.repo_ids, &self.repo_ids);
        override_string(&mut settings.container_name, &self.container_name);
    }
}

impl ReleaseArgs {
    pub fn apply(&self, settings: &mut ReleaseSettings) {
        self.artifacts.apply(settings);
        override_string(
            &mut settings.docker_organisation,
            &self.docker_organisation,
        );
        override_string(
            &mut settings.promote_to_docker_registry,
            &self.promote_to_docker_registry,
        );
        override_list(
            &mut settings.promote_docker_images,
            &self.promote_docker_images,
        );
        override_list(
            &mut settings.extra_images_to_tag,
            &self.extra_images_to_tag,
        );
        override_string(
            &mut settings.repository_to_wait_for,
            &self.repository_to_wait_for,
        );
        override_string(&mut settings.group_id, &self.group_id);
        override_string(
            &mut settings.artifact_id_to_wait_for,
            &self.artifact_id_to_wait_for,
        );
        override_string(
            &mut settings.artifact_extension_to_wait_for,
            &self.artifact_extension_to_wait_for,
        );
    }
}

impl PromoteArgs {
    pub fn apply(&self, options: &mut PromoteOptions) {
        // flags can only switch an option on
        options.helm_push |= self.helm_push;
        options.update_next_development_version |=
            self.update_next_development_version;
        override_string(
            &mut options.update_next_development_version_arguments,
            &self.update_next_development_version_arguments,
        );
    }
}

impl SiteArgs {
    pub fn apply(&self, site: &mut SiteConfig) {
        override_string(&mut site.service_name, &self.service_name);
        if self.skip_content_repository {
            site.use_content_repository = false;
        }
    }
}

fn override_string(target: &mut String, value: &Option<String>) {
    if let Some(value) = value
        && !value.trim().is_empty()
    {
        *target = value.clone();
    }
}

fn override_list(target: &mut Vec<String>, values: &[String]) {
    if !values.is_empty() {
        *target = values.to_vec();
    }
}
