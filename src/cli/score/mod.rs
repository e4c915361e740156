//! Score command - fills the similarity cache for the whole dataset

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use super::PathArgs;
use crate::config::AppConfig;
use crate::domain::{RetryingOracle, TalkSource, TokioSleeper};
use crate::infrastructure::cache::JsonFileCacheStore;
use crate::infrastructure::credentials::EnvCredentialProvider;
use crate::infrastructure::llm::{HttpClient, MistralProvider};
use crate::infrastructure::services::PairwiseScoringService;
use crate::infrastructure::similarity::{LlmPairScorer, LlmScorerConfig};
use crate::infrastructure::talk::CsvTalkSource;

/// Arguments for the score command
#[derive(Args, Clone, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Fail before scoring if the API key is not set
    #[arg(long)]
    pub require_api_key: bool,
}

/// Run a full scoring pass
pub async fn run(args: ScoreArgs) -> anyhow::Result<()> {
    let config = super::bootstrap(&args.paths)?;

    let api_key = resolve_api_key(&config, args.require_api_key)?;
    let mut service = build_service(&config, api_key)?;

    let source = CsvTalkSource::new(&config.scoring.dataset_path);
    let talks = source
        .load()
        .await
        .with_context(|| format!("Failed to load talks from {}", source.source_name()))?;

    info!(
        talks = talks.len(),
        cache = %config.scoring.cache_path.display(),
        "Starting scoring run"
    );

    let summary = service.run(&talks).await?;

    println!(
        "Processed {} new pairs out of {} possible.",
        summary.new_pairs, summary.total_pairs
    );
    println!("Cache saved to '{}'", config.scoring.cache_path.display());

    Ok(())
}

/// Read the API key. A missing key only fails the command when required;
/// otherwise every oracle call fails and the affected pairs score 0.0.
fn resolve_api_key(config: &AppConfig, required: bool) -> anyhow::Result<String> {
    let credentials = EnvCredentialProvider::new(&config.oracle.api_key_env);

    match credentials.api_key() {
        Ok(key) => Ok(key),
        Err(e) if required => Err(e.into()),
        Err(e) => {
            warn!("{}; every new pair will score 0.0", e);
            Ok(String::new())
        }
    }
}

fn build_service(config: &AppConfig, api_key: String) -> anyhow::Result<PairwiseScoringService> {
    config.validate()?;

    let client = HttpClient::with_timeout(config.oracle.request_timeout())?;
    let provider = Arc::new(MistralProvider::with_base_url(
        client,
        api_key,
        &config.oracle.base_url,
    ));

    let scorer = Arc::new(LlmPairScorer::new(
        provider,
        LlmScorerConfig {
            model: config.oracle.model.clone(),
            temperature: config.oracle.temperature,
            max_tokens: config.oracle.max_tokens,
        },
    ));

    let sleeper = Arc::new(TokioSleeper);
    let oracle = Arc::new(RetryingOracle::new(
        scorer,
        config.retry.clone(),
        sleeper.clone(),
    ));
    let store = Arc::new(JsonFileCacheStore::new(&config.scoring.cache_path));

    Ok(PairwiseScoringService::new(oracle, store, sleeper)
        .with_pair_delay(config.scoring.pair_delay()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_tolerated_unless_required() {
        let mut config = AppConfig::default();
        config.oracle.api_key_env = "TALK_SIMILARITY_TEST_UNSET_KEY".to_string();

        assert_eq!(resolve_api_key(&config, false).unwrap(), "");
        assert!(resolve_api_key(&config, true).is_err());
    }

    #[test]
    fn test_present_key_is_returned() {
        let mut config = AppConfig::default();
        config.oracle.api_key_env = "TALK_SIMILARITY_TEST_PRESENT_KEY".to_string();
        // SAFETY: Test runs in isolation
        unsafe { std::env::set_var("TALK_SIMILARITY_TEST_PRESENT_KEY", "sk-test") };

        let result = resolve_api_key(&config, true);

        // SAFETY: Test cleanup
        unsafe { std::env::remove_var("TALK_SIMILARITY_TEST_PRESENT_KEY") };

        assert_eq!(result.unwrap(), "sk-test");
    }

    #[test]
    fn test_build_service_from_defaults() {
        let mut config = AppConfig::default();
        config.scoring.cache_path = std::env::temp_dir().join("talk-similarity-unused.json");

        let service = build_service(&config, "sk-test".to_string()).unwrap();
        assert!(service.cache().is_empty());
    }

    #[test]
    fn test_build_service_rejects_zero_attempts() {
        let mut config = AppConfig::default();
        config.retry.max_attempts = 0;

        assert!(build_service(&config, "sk-test".to_string()).is_err());
    }
}
