//! LLM-based pair scorer
//!
//! Asks a chat model for a bare number describing how close two talks are.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::similarity::PairScorer;
use crate::domain::{DomainError, FinishReason, LlmProvider, LlmRequest, Talk};

pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Generation settings for the scoring request
#[derive(Debug, Clone, PartialEq)]
pub struct LlmScorerConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmScorerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 5,
        }
    }
}

/// Pair scorer that uses an LLM for evaluation
#[derive(Debug)]
pub struct LlmPairScorer<P>
where
    P: LlmProvider,
{
    provider: Arc<P>,
    config: LlmScorerConfig,
}

impl<P: LlmProvider> LlmPairScorer<P> {
    pub fn new(provider: Arc<P>, config: LlmScorerConfig) -> Self {
        Self { provider, config }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<P>) -> Self {
        Self::new(provider, LlmScorerConfig::default())
    }

    fn build_prompt(&self, first: &Talk, second: &Talk) -> String {
        format!(
            r#"You are an expert in mobile development, QA, and software engineering conferences.
Given two conference talk descriptions below, rate their thematic similarity on a scale from 0.0 (completely unrelated) to 1.0 (identical topic and focus).

Talk 1:
Title: "{}"
Description: "{}"

Talk 2:
Title: "{}"
Description: "{}"

Respond ONLY with a number between 0.0 and 1.0, rounded to one decimal place."#,
            first.title(),
            first.text_or_empty(),
            second.title(),
            second.text_or_empty(),
        )
    }
}

fn parse_score(content: &str) -> Result<f64, DomainError> {
    let raw = content.trim();
    raw.parse::<f64>().map_err(|e| {
        DomainError::validation(format!("Could not parse score from '{}': {}", raw, e))
    })
}

#[async_trait]
impl<P: LlmProvider> PairScorer for LlmPairScorer<P> {
    async fn score_pair(&self, first: &Talk, second: &Talk) -> Result<f64, DomainError> {
        let request = LlmRequest::builder()
            .user(self.build_prompt(first, second))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self.provider.chat(&self.config.model, request).await?;

        if response.finish_reason == Some(FinishReason::Length) {
            warn!(
                "Reply for talks {} and {} hit the {} token limit",
                first.id(),
                second.id(),
                self.config.max_tokens
            );
        }

        let content = response.content().ok_or_else(|| {
            DomainError::provider(self.provider.provider_name(), "Empty response from LLM")
        })?;

        let score = parse_score(content)?;

        debug!(
            "Talks {} and {} scored {} by {} (model: {}, tokens: {})",
            first.id(),
            second.id(),
            score,
            self.provider.provider_name(),
            self.config.model,
            response.usage.as_ref().map_or(0, |usage| usage.total_tokens)
        );

        Ok(score)
    }

    fn scorer_name(&self) -> &'static str {
        "llm"
    }
}
