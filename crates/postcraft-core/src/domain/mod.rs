//! Domain entities - the inputs and outputs of one generation run.

mod post;
mod request;

pub use post::{GeneratedPost, PERSONAS, PostOutline};
pub use request::{GenerationRequest, PostLength, ProviderKind};
