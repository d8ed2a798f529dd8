//! # Postcraft Core
//!
//! The domain layer of Postcraft.
//! Holds the post generation pipeline, content safety rules and the ports
//! that infrastructure implements. No HTTP or provider SDK code lives here.

pub mod domain;
pub mod error;
pub mod generation;
pub mod ports;
pub mod profile;
pub mod safety;

pub use error::DomainError;
pub use generation::{Generation, GenerationStage, PostGenerator};
pub use safety::{ContentSafetyChecker, SafetyResult};
