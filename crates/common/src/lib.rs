//! Shared utilities, configuration, and error handling for Yachay
//!
//! This crate provides common functionality used across the Yachay services:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Request extractors shared by API handlers

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
