//! Hierarchy validation
//!
//! Walks a path's ancestor chain against the store before anything is created.

mod validator;

pub use validator::ensure_ancestors;
