//! # Postcraft Infrastructure
//!
//! Concrete implementations of the ports defined in `postcraft-core`:
//! the request rate limiter and the HTTP text-generation providers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All providers enabled
//! - `minimal` - Rate limiting only; every provider reports as disabled
//! - `gemini` - Google Gemini client via reqwest
//! - `openai` - OpenAI chat-completions client via reqwest

pub mod providers;
pub mod rate_limit;

pub use providers::{HttpProviderFactory, ProviderConfig, ProviderSettings};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "gemini")]
pub use providers::GeminiProvider;
#[cfg(feature = "openai")]
pub use providers::OpenAiProvider;
