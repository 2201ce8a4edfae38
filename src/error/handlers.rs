//! Error handlers
//!
//! Logs collapsed failures and maps them to front-end reply codes.

use crate::error::types::GridError;
use crate::protocol::responses;
use log::{error, warn};

/// Log a grid error raised while running `operation` on `path`.
///
/// Conflicts and store failures are logged as errors; the rest are expected
/// outcomes of a boolean API and only warrant a warning.
pub fn handle_error(operation: &str, path: &str, err: &GridError) {
    match err {
        GridError::AncestorIsFile { .. } | GridError::Store(_) => {
            error!("{} {} failed: {}", operation, path, err)
        }
        _ => warn!("{} {} failed: {}", operation, path, err),
    }
}

/// Convert a grid error to a reply code
pub fn error_to_reply_code(err: &GridError) -> u16 {
    match err {
        GridError::MalformedPath(_) => responses::SYNTAX_ERROR_IN_ARGS,
        GridError::AncestorIsFile { .. } => responses::ACTION_NOT_TAKEN,
        GridError::AncestorMissing { .. } => responses::ACTION_NOT_TAKEN,
        GridError::AlreadyExists(_) => responses::ALREADY_EXISTS,
        GridError::Store(_) => responses::LOCAL_ERROR,
    }
}
