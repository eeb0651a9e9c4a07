//! Docker image promotion and tagging with the docker CLI.
use async_trait::async_trait;
use log::*;
use std::sync::Arc;

use crate::{
    Result,
    capability::{
        traits::{CommandRunner, ImagePromoter, ImageTagger},
        types::{PromoteImagesArgs, ShellCommand, TagImagesArgs},
    },
};

pub struct DockerImages {
    runner: Arc<dyn CommandRunner>,
}

impl DockerImages {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Pull, retag and push of each image into the destination registry.
    pub fn promote_commands(args: &PromoteImagesArgs) -> Vec<ShellCommand> {
        args.images
            .iter()
            .flat_map(|image| {
                let source =
                    format!("{}/{}:{}", args.organisation, image, args.version);
                let target = format!("{}/{}", args.registry, source);
                [
                    docker(["pull", source.as_str()]),
                    docker(["tag", source.as_str(), target.as_str()]),
                    docker(["push", target.as_str()]),
                ]
            })
            .collect()
    }

    /// Pull of `latest`, tag with the release version and push of each
    /// image.
    pub fn tag_commands(args: &TagImagesArgs) -> Vec<ShellCommand> {
        args.images
            .iter()
            .flat_map(|image| {
                let latest = format!("{image}:latest");
                let versioned = format!("{image}:{}", args.version);
                [
                    docker(["pull", latest.as_str()]),
                    docker(["tag", latest.as_str(), versioned.as_str()]),
                    docker(["push", versioned.as_str()]),
                ]
            })
            .collect()
    }

    async fn run_all(&self, commands: Vec<ShellCommand>) -> Result<()> {
        for cmd in commands.iter() {
            self.runner.run(cmd).await?;
        }
        Ok(())
    }
}

fn docker<const N: usize>(args: [&str; N]) -> ShellCommand {
    ShellCommand::new("docker").args(args)
}

#[async_trait]
impl ImagePromoter for DockerImages {
    async fn promote_images(&self, args: &PromoteImagesArgs) -> Result<()> {
        info!(
            "promoting images {:?} to {}/{}",
            args.images, args.registry, args.organisation
        );
        self.run_all(Self::promote_commands(args)).await
    }
}

#[async_trait]
impl ImageTagger for DockerImages {
    async fn tag_images(&self, args: &TagImagesArgs) -> Result<()> {
        info!("tagging images {:?} with {}", args.images, args.version);
        self.run_all(Self::tag_commands(args)).await
    }
}
