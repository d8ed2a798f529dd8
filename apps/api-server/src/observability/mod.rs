//! Observability module - request IDs on top of the tracing spans.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};
