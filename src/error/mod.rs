//! Error handling
//!
//! Defines error types and handling for the grid filesystem.

pub mod handlers;
pub mod types;

pub use types::*;
