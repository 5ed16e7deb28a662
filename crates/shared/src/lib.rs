//! Shared types, errors, and configuration for Keymetal.
//!
//! This crate provides common types used across all other crates:
//! - The currency denominations (scrap, reclaimed, refined, keys)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CalculatorConfig, LogConfig};
pub use error::{AppError, AppResult};
pub use types::Denomination;
