//! # Postcraft Shared
//!
//! Wire types between the server and the browser UI: request bodies,
//! server-sent event frames and problem responses.

pub mod dto;
pub mod response;

pub use dto::{GenerateRequestDto, HealthResponse, ProfileToneRequest, StreamEvent};
pub use response::ErrorResponse;
