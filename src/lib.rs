pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod rate_limiter;
pub mod services;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::info;

use crate::api::IpscClient;
use crate::cache::CacheStore;
use crate::config::settings::AppConfig;
use crate::domain::{competition_status, MatchDataSet, MatchOutcome, ShooterDirectory};
use crate::services::report;
use crate::services::SyncService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(cli: &Cli) -> AppConfig {
    AppConfig::new().with_cache(cli.cache, cli.cache_path.clone())
}

pub fn handle_sync(config: &AppConfig) -> Result<()> {
    let data = load_data_set(config)?;
    println!("Loaded {} of {} matches", data.len(), data.matches().len());
    Ok(())
}

pub fn handle_shooters(config: &AppConfig, filter: Option<&str>) -> Result<()> {
    let data = load_data_set(config)?;
    let directory = ShooterDirectory::from_data_set(&data);

    let entries = match filter {
        Some(text) => directory.search(text),
        None => directory.entries().iter().collect(),
    };
    report::print_directory(&entries);
    Ok(())
}

pub fn handle_status(config: &AppConfig, public_id: &str) -> Result<()> {
    let data = load_data_set(config)?;
    let directory = ShooterDirectory::from_data_set(&data);

    let shooter = directory
        .lookup(public_id)
        .with_context(|| format!("No shooter with public id {}", public_id))?;

    let statuses = competition_status(&data, &shooter.public_id);
    report::print_statuses(shooter, &statuses);
    Ok(())
}

pub fn handle_export(config: &AppConfig, match_id: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let data = runtime.block_on(async {
        let mut service = build_sync_service(config).await?;
        let matches = service.discover_matches(&config.matches).await?;
        let event = matches
            .into_iter()
            .find(|m| m.id == match_id)
            .with_context(|| format!("Match {} is not among the selected matches", match_id))?;

        let outcome = service.load_match(&event).await;
        if outcome == MatchOutcome::Failed {
            anyhow::bail!("Match {} could not be loaded", match_id);
        }
        anyhow::Ok(MatchDataSet::from_outcomes(vec![event], [(match_id.to_string(), outcome)]))
    })?;

    let export = data
        .export(match_id)
        .with_context(|| format!("Match {} has no data", match_id))?;
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

fn load_data_set(config: &AppConfig) -> Result<MatchDataSet> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut service = build_sync_service(config).await?;
        service
            .run(&config.matches, |progress| info!("{}", report::progress_message(progress)))
            .await
    })
}

async fn build_sync_service(config: &AppConfig) -> Result<SyncService<IpscClient, Box<dyn CacheStore>>> {
    let fetcher = IpscClient::new(&config.fetcher)?;
    let cache = cache::open_store(&config.cache).await;
    Ok(SyncService::new(fetcher, cache, &config.cache))
}
