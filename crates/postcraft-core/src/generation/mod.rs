//! Post generation pipeline.
//!
//! One request becomes `post_count` drafts through four strictly ordered
//! stages, each covering every post at once:
//!
//! 1. Planning - one model call produces all outlines.
//! 2. Drafting - one model call expands all outlines.
//! 3. Hashtag Generation - one model call suggests tags for all drafts.
//! 4. Content Safety - local check, flagged drafts are sanitized.
//!
//! Unusable model output never fails a run: each stage falls back to a
//! deterministic value and records why in [`Generation::fallbacks`]. Provider
//! failures other than timeouts end the run with an error.

mod parse;
mod prompts;
mod text;

pub use parse::{
    FallbackReason, ParseOutcome, decode_json, extract_json, parse_or_fallback,
};
pub use text::{ELLIPSIS, trim_to_word_count};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::domain::{GeneratedPost, GenerationRequest, PostOutline};
use crate::error::DomainError;
use crate::ports::{ProviderError, TextGenerator};
use crate::safety::ContentSafetyChecker;

/// Default upper bound on a single model call.
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Progress steps reported to the caller, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Planning,
    Drafting,
    HashtagGeneration,
    ContentSafety,
    Packaging,
}

impl GenerationStage {
    pub const ALL: [GenerationStage; 5] = [
        GenerationStage::Planning,
        GenerationStage::Drafting,
        GenerationStage::HashtagGeneration,
        GenerationStage::ContentSafety,
        GenerationStage::Packaging,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GenerationStage::Planning => "Planning",
            GenerationStage::Drafting => "Drafting",
            GenerationStage::HashtagGeneration => "Hashtag Generation",
            GenerationStage::ContentSafety => "Content Safety",
            GenerationStage::Packaging => "Packaging",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GenerationStage::Planning => "Generating outlines...",
            GenerationStage::Drafting => "Generating posts...",
            GenerationStage::HashtagGeneration => "Generating hashtags...",
            GenerationStage::ContentSafety => "Checking content...",
            GenerationStage::Packaging => "Finalizing...",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stage that used its fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFallback {
    pub stage: GenerationStage,
    pub reason: FallbackReason,
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub posts: Vec<GeneratedPost>,
    pub fallbacks: Vec<StageFallback>,
    /// Estimated tokens across every prompt and reply of the run.
    pub total_tokens: u64,
}

impl Generation {
    /// Whether `stage` fell back during this run.
    pub fn fell_back(&self, stage: GenerationStage) -> bool {
        self.fallbacks.iter().any(|f| f.stage == stage)
    }
}

/// Outline replies are usually an array, but a lone object is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Running token estimate for one run.
#[derive(Debug, Default)]
struct TokenLedger {
    total: u64,
}

/// Orchestrates the batched generation pipeline over a [`TextGenerator`].
pub struct PostGenerator {
    provider: Arc<dyn TextGenerator>,
    safety: ContentSafetyChecker,
    stage_timeout: Duration,
}

impl PostGenerator {
    pub fn new(provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider,
            safety: ContentSafetyChecker::new(),
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }

    pub fn with_stage_timeout(mut self, stage_timeout: Duration) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    /// Run the full pipeline for `request`.
    ///
    /// `on_progress` is called before each of the five steps and must return
    /// promptly; the pipeline does not wait on anything it triggers.
    pub async fn generate_posts<F>(
        &self,
        request: &GenerationRequest,
        on_progress: F,
    ) -> Result<Generation, DomainError>
    where
        F: Fn(GenerationStage),
    {
        let count = request.post_count;
        if count == 0 {
            return Err(DomainError::Validation(
                "postCount must be at least 1".to_string(),
            ));
        }

        let started = Instant::now();
        let mut ledger = TokenLedger::default();
        let mut fallbacks = Vec::new();

        tracing::info!(
            provider = self.provider.name(),
            topic = %request.topic,
            post_count = count,
            "Starting post generation"
        );

        on_progress(GenerationStage::Planning);
        let outlines = self.create_outlines(request, &mut ledger).await?;
        let outlines = record(GenerationStage::Planning, outlines, &mut fallbacks);

        on_progress(GenerationStage::Drafting);
        let drafts = self.expand_outlines(&outlines, request, &mut ledger).await?;
        let drafts = record(GenerationStage::Drafting, drafts, &mut fallbacks);

        on_progress(GenerationStage::HashtagGeneration);
        let hashtags = self.generate_hashtags(&drafts, request, &mut ledger).await?;
        let hashtags = record(GenerationStage::HashtagGeneration, hashtags, &mut fallbacks);

        on_progress(GenerationStage::ContentSafety);
        let checked: Vec<String> = drafts.iter().map(|d| self.safety.filter(d)).collect();

        on_progress(GenerationStage::Packaging);
        let latency = started.elapsed().as_millis() as u64;
        let tokens_per_post = ledger.total.div_ceil(count as u64);
        let persona = request.requested_persona();

        let posts = outlines
            .into_iter()
            .zip(checked)
            .zip(hashtags)
            .enumerate()
            .map(|(i, ((outline, text), tags))| GeneratedPost {
                id: format!("post-{}", i + 1),
                persona: persona
                    .unwrap_or_else(|| GeneratedPost::rotating_persona(i))
                    .to_string(),
                planning_outline: outline,
                final_text: match request.word_count {
                    Some(words) => trim_to_word_count(&text, words),
                    None => text,
                },
                suggested_hashtags: tags,
                tokens_used: tokens_per_post,
                latency,
            })
            .collect();

        tracing::info!(
            latency_ms = latency,
            total_tokens = ledger.total,
            fallbacks = fallbacks.len(),
            "Post generation completed"
        );

        Ok(Generation {
            posts,
            fallbacks,
            total_tokens: ledger.total,
        })
    }

    async fn create_outlines(
        &self,
        request: &GenerationRequest,
        ledger: &mut TokenLedger,
    ) -> Result<ParseOutcome<Vec<PostOutline>>, ProviderError> {
        let count = request.post_count;
        let fallback = || vec![PostOutline::fallback(&request.topic); count];
        let prompt = prompts::outline_prompt(request);

        Ok(match self.complete(&prompt, ledger).await? {
            Some(raw) => parse_or_fallback(
                &raw,
                |r| decode_json::<OneOrMany<PostOutline>>(r).map(Vec::from),
                fallback,
            )
            .fit_to(count, |_| PostOutline::fallback(&request.topic)),
            None => ParseOutcome::fallback(fallback(), FallbackReason::Timeout),
        })
    }

    async fn expand_outlines(
        &self,
        outlines: &[PostOutline],
        request: &GenerationRequest,
        ledger: &mut TokenLedger,
    ) -> Result<ParseOutcome<Vec<String>>, ProviderError> {
        let count = outlines.len();
        let prompt = prompts::expansion_prompt(outlines, request);

        Ok(match self.complete(&prompt, ledger).await? {
            Some(raw) => parse_or_fallback(&raw, decode_json::<Vec<String>>, || {
                vec![String::new(); count]
            })
            .fit_to(count, |_| String::new()),
            None => ParseOutcome::fallback(vec![String::new(); count], FallbackReason::Timeout),
        })
    }

    async fn generate_hashtags(
        &self,
        posts: &[String],
        request: &GenerationRequest,
        ledger: &mut TokenLedger,
    ) -> Result<ParseOutcome<Vec<Vec<String>>>, ProviderError> {
        let count = posts.len();
        let prompt = prompts::hashtag_prompt(posts, request);

        Ok(match self.complete(&prompt, ledger).await? {
            Some(raw) => parse_or_fallback(&raw, decode_json::<Vec<Vec<String>>>, || {
                vec![Vec::new(); count]
            })
            .fit_to(count, |_| Vec::new()),
            None => ParseOutcome::fallback(vec![Vec::new(); count], FallbackReason::Timeout),
        })
    }

    /// One bounded provider call with token accounting.
    ///
    /// `Ok(None)` means the call timed out and the stage should fall back.
    async fn complete(
        &self,
        prompt: &str,
        ledger: &mut TokenLedger,
    ) -> Result<Option<String>, ProviderError> {
        ledger.total += self.provider.count_tokens(prompt);

        let response =
            match tokio::time::timeout(self.stage_timeout, self.provider.generate_text(prompt))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(self.stage_timeout)),
            };

        match response {
            Ok(text) => {
                ledger.total += self.provider.count_tokens(&text);
                tracing::debug!(
                    provider = self.provider.name(),
                    response_chars = text.len(),
                    "Provider call completed"
                );
                Ok(Some(text))
            }
            Err(ProviderError::Timeout(after)) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    timeout = ?after,
                    "Provider call timed out, using fallback"
                );
                Ok(None)
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), error = %e, "Provider call failed");
                Err(e)
            }
        }
    }
}

/// Log and collect a stage's fallback, then unwrap its value.
fn record<T>(
    stage: GenerationStage,
    outcome: ParseOutcome<T>,
    fallbacks: &mut Vec<StageFallback>,
) -> T {
    if let Some(reason) = outcome.reason() {
        tracing::warn!(stage = %stage, reason = %reason, "Stage fell back to default output");
        fallbacks.push(StageFallback {
            stage,
            reason: reason.clone(),
        });
    }
    outcome.into_value()
}
