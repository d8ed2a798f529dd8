//! In-memory collaborators for handler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use postcraft_core::domain::ProviderKind;
use postcraft_core::ports::{ProviderError, ProviderFactory, TextGenerator};
use postcraft_core::profile::ProfileToneExtractor;
use postcraft_infra::{InMemoryRateLimiter, RateLimitConfig};

use crate::config::DEFAULT_SERVICE_NAME;
use crate::state::AppState;

pub enum Reply {
    Text(String),
    Fail,
}

/// Answers prompts from a fixed script, then with empty text.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, ProviderError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail) => Err(ProviderError::Api {
                status: 503,
                body: "model overloaded".to_string(),
            }),
            None => Ok(String::new()),
        }
    }

    fn count_tokens(&self, text: &str) -> u64 {
        text.len() as u64
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Only Gemini is "configured"; OpenAI reports a missing key.
struct StubFactory {
    generator: Arc<ScriptedGenerator>,
}

impl ProviderFactory for StubFactory {
    fn create(&self, kind: ProviderKind) -> Result<Arc<dyn TextGenerator>, ProviderError> {
        match kind {
            ProviderKind::Gemini => Ok(self.generator.clone()),
            ProviderKind::OpenAi => Err(ProviderError::MissingCredential(kind)),
        }
    }
}

pub fn stub_state(replies: Vec<Reply>, max_requests: u32) -> AppState {
    let generator = Arc::new(ScriptedGenerator {
        replies: Mutex::new(replies.into()),
    });

    AppState {
        providers: Arc::new(StubFactory { generator }),
        rate_limiter: Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        })),
        trust_forwarded_for: false,
        profile_extractor: ProfileToneExtractor::new(Duration::ZERO),
        stage_timeout: Duration::from_secs(5),
        service_name: DEFAULT_SERVICE_NAME.to_string(),
    }
}
