//! # Domain Layer
//!
//! Personas, transcript and reply models, small-talk rules, and the error type.
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
