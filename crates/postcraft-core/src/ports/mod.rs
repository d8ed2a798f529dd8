//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod text_generator;

pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use text_generator::{ProviderError, ProviderFactory, TextGenerator};
