//! Status command - reports cache coverage without calling the oracle

use anyhow::Context;
use clap::Args;

use super::PathArgs;
use crate::domain::TalkSource;
use crate::infrastructure::cache::JsonFileCacheStore;
use crate::infrastructure::services::Coverage;
use crate::infrastructure::talk::CsvTalkSource;

/// Arguments for the status command
#[derive(Args, Clone, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub paths: PathArgs,
}

pub async fn run(args: StatusArgs) -> anyhow::Result<()> {
    let config = super::bootstrap(&args.paths)?;

    let source = CsvTalkSource::new(&config.scoring.dataset_path);
    let talks = source
        .load()
        .await
        .with_context(|| format!("Failed to load talks from {}", source.source_name()))?;

    let store = JsonFileCacheStore::new(&config.scoring.cache_path);
    let coverage = Coverage::measure(&store, &talks).await?;

    println!("Talks: {}", talks.len());
    println!(
        "Cached pairs: {} of {} ({} missing)",
        coverage.cached, coverage.total, coverage.missing
    );

    Ok(())
}
