//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Completion API (Perplexity over HTTPS)
//! - Secrets (TOML file)
//! - Terminal chat surface and container wiring

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
