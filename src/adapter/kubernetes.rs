//! Service lookup in the current kubernetes namespace via kubectl.
use async_trait::async_trait;
use log::*;
use std::sync::Arc;

use crate::{
    Result,
    capability::{
        traits::{CommandRunner, ServiceDiscovery},
        types::ShellCommand,
    },
};

pub struct KubectlServiceDiscovery {
    runner: Arc<dyn CommandRunner>,
}

impl KubectlServiceDiscovery {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn lookup_command(name: &str) -> ShellCommand {
        ShellCommand::new("kubectl").args([
            "get",
            "service",
            name,
            "--ignore-not-found",
            "-o",
            "name",
        ])
    }
}

#[async_trait]
impl ServiceDiscovery for KubectlServiceDiscovery {
    async fn has_service(&self, name: &str) -> Result<bool> {
        let output = self.runner.run(&Self::lookup_command(name)).await?;
        let found = !output.stdout.trim().is_empty();
        debug!("service {name} present: {found}");
        Ok(found)
    }
}
