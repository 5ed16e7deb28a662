//! Common types used across the application.

pub mod denomination;

pub use denomination::Denomination;
