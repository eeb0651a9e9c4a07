//! Optional maven site deployment to the content repository service.
use log::*;
use serde::Serialize;
use std::rc::Rc;

use crate::{
    Result, capability::manager::CapabilityManager, config::site::SiteConfig,
};

/// Result of a site deployment attempt. A failed deploy is reported as
/// [`SiteDeployOutcome::SoftFailure`], never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "kebab-case")]
pub enum SiteDeployOutcome {
    Disabled,
    ServiceMissing,
    Deployed,
    SoftFailure(String),
}

impl SiteDeployOutcome {
    pub fn is_soft_failure(&self) -> bool {
        matches!(self, SiteDeployOutcome::SoftFailure(_))
    }
}

pub struct SiteDeployment {
    capabilities: Rc<CapabilityManager>,
}

impl SiteDeployment {
    pub fn new(capabilities: Rc<CapabilityManager>) -> Self {
        Self { capabilities }
    }

    /// Deploys the site when enabled and the content repository service
    /// exists. Only the service lookup can return an error.
    pub async fn apply(&self, config: &SiteConfig) -> Result<SiteDeployOutcome> {
        if !config.use_content_repository {
            debug!("content repository disabled: skipping maven site");
            return Ok(SiteDeployOutcome::Disabled);
        }

        let service = config.service_name.as_str();

        info!("checking {service} exists");

        if !self.capabilities.has_service(service).await? {
            info!(
                "no {service} service so not deploying the maven site report"
            );
            return Ok(SiteDeployOutcome::ServiceMissing);
        }

        match self.capabilities.deploy_site().await {
            Ok(()) => {
                info!("deployed maven site to {service}");
                Ok(SiteDeployOutcome::Deployed)
            }
            Err(err) => {
                // maven site is not critical to the release
                warn!("unable to generate maven site: {err}");
                Ok(SiteDeployOutcome::SoftFailure(err.to_string()))
            }
        }
    }
}
