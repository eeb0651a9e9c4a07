use clap::Parser;
use log::*;
use std::rc::Rc;

use stagehand::{
    ReleaseOrchestrator, Result,
    adapter::factory::CapabilityFactory,
    cli::{Args, Command},
    config::Config,
    orchestrator::{
        promote::ArtifactPromoter, site::SiteDeployment,
        stages::promote_artifacts_args,
    },
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("stagehand")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let mut config = Config::load(cli_args.config.as_deref()).await?;
    cli_args.apply(&mut config);

    let dry_run = cli_args.dry_run;

    match &cli_args.command {
        Command::Release { json, .. } => {
            let capabilities =
                Rc::new(CapabilityFactory::create(&config, dry_run)?);
            let orchestrator = ReleaseOrchestrator::builder()
                .config(Rc::new(config.release_config()?))
                .capabilities(capabilities)
                .build()?;

            let report = orchestrator.execute().await?;

            info!(
                "completed stages: {:?}, warnings: {}",
                report.completed_stages(),
                report.warnings.len()
            );

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::PromoteArtifacts { .. } => {
            let release = config.release_config()?;
            let capabilities =
                Rc::new(CapabilityFactory::create(&config, dry_run)?);
            let promoter = ArtifactPromoter::new(capabilities);

            match promoter.apply(&promote_artifacts_args(&release)).await? {
                Some(pr) => println!(
                    "{}",
                    pr.url.unwrap_or_else(|| format!("#{}", pr.number))
                ),
                None => info!("no pull request created"),
            }
        }
        Command::DeploySite(_) => {
            let capabilities =
                Rc::new(CapabilityFactory::create_for_site(&config, dry_run)?);
            let outcome = SiteDeployment::new(capabilities)
                .apply(&config.site)
                .await?;

            info!("site deploy: {}", serde_json::to_string(&outcome)?);
        }
    }

    Ok(())
}
