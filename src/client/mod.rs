//! Client session handling
//!
//! Reads command lines from one connection and writes replies back.

pub mod handler;

pub use handler::handle_client;
