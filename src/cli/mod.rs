//! CLI module for the talk similarity builder
//!
//! Provides subcommands:
//! - `score`: fill the pairwise similarity cache
//! - `status`: report how much of the pair matrix is already cached

pub mod score;
pub mod status;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Talk similarity - resumable pairwise similarity scoring with an LLM
#[derive(Parser)]
#[command(name = "talk-similarity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score every pair of talks missing from the cache
    Score(score::ScoreArgs),

    /// Show cache coverage for the dataset without calling the oracle
    Status(status::StatusArgs),
}

/// Input and output locations shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct PathArgs {
    /// Talk dataset CSV (overrides config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Similarity cache JSON file (overrides config)
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

impl PathArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dataset) = &self.dataset {
            config.scoring.dataset_path = dataset.clone();
        }
        if let Some(cache) = &self.cache {
            config.scoring.cache_path = cache.clone();
        }
    }
}

/// Load `.env` and configuration, then install logging
fn bootstrap(paths: &PathArgs) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    paths.apply(&mut config);
    logging::init_logging(&config.logging);

    Ok(config)
}
