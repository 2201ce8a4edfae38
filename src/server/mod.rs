//! Server core functionality
//!
//! This module contains the TCP front end that exposes the grid
//! filesystem over a line protocol.

pub mod core;

pub use self::core::Server;
