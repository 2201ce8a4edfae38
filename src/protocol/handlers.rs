//! Command handlers module for the grid filesystem front end.
//!
//! Each handler runs one facade operation and turns its outcome into a
//! reply line.

use log::info;

use crate::error::GridError;
use crate::error::handlers::{error_to_reply_code, handle_error};
use crate::grid::GridFs;
use crate::protocol::responses::{self, format_multiline, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a parsed command to its corresponding handler.
///
/// # Arguments
///
/// * `fs` - The grid filesystem shared by all clients.
/// * `command` - Reference to the parsed command enum.
///
/// # Returns
///
/// * `CommandResult` - Result of the command execution, including status and message.
pub fn handle_command(fs: &GridFs, command: &Command) -> CommandResult {
    match command {
        Command::Quit => handle_cmd_quit(),
        Command::Touch(path) => handle_cmd_touch(fs, path),
        Command::Mkd(path) => handle_cmd_mkd(fs, path),
        Command::Mkds(path) => handle_cmd_mkds(fs, path),
        Command::Exists(path) => handle_cmd_exists(fs, path),
        Command::Stat(path) => handle_cmd_stat(fs, path),
        Command::List(path) => handle_cmd_list(fs, path),
        Command::Unknown => handle_cmd_unknown(),
    }
}

fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::GOODBYE, "Goodbye")),
    }
}

fn handle_cmd_touch(fs: &GridFs, path: &str) -> CommandResult {
    let file = fs.file(path);
    creation_result("TOUCH", file.path(), file.try_create_file(), "File created")
}

fn handle_cmd_mkd(fs: &GridFs, path: &str) -> CommandResult {
    let dir = fs.file(path);
    creation_result("MKD", dir.path(), dir.try_mkdir(), "Directory created")
}

fn handle_cmd_mkds(fs: &GridFs, path: &str) -> CommandResult {
    let dir = fs.file(path);
    creation_result("MKDS", dir.path(), dir.try_mkdirs(), "Directory tree created")
}

fn handle_cmd_exists(fs: &GridFs, path: &str) -> CommandResult {
    match fs.file(path).metadata() {
        Ok(meta) => CommandResult {
            status: CommandStatus::Success,
            message: Some(format_response(
                responses::STATUS,
                if meta.is_some() { "true" } else { "false" },
            )),
        },
        Err(e) => failure("EXISTS", path, e),
    }
}

fn handle_cmd_stat(fs: &GridFs, path: &str) -> CommandResult {
    let file = fs.file(path);
    match file.metadata() {
        Ok(Some(meta)) => CommandResult {
            status: CommandStatus::Success,
            message: Some(format_response(
                responses::STATUS,
                &format!("{}: {}", file.path(), meta),
            )),
        },
        Ok(None) => CommandResult {
            status: CommandStatus::Failure("No such entry".into()),
            message: Some(format_response(
                responses::ACTION_NOT_TAKEN,
                &format!("{}: No such entry", file.path()),
            )),
        },
        Err(e) => failure("STAT", file.path(), e),
    }
}

fn handle_cmd_list(fs: &GridFs, path: &str) -> CommandResult {
    let dir = fs.file(path);
    match dir.try_list() {
        Ok(children) => {
            let mut entries: Vec<String> = children.into_iter().collect();
            entries.sort();
            info!("Listed {} - {} entries", dir.path(), entries.len());

            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_multiline(
                    responses::ACTION_OK,
                    &entries,
                    &format!("{} entries", entries.len()),
                )),
            }
        }
        Err(e) => failure("LIST", dir.path(), e),
    }
}

fn handle_cmd_unknown() -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure("Unknown command".into()),
        message: Some(format_response(
            responses::SYNTAX_ERROR,
            "Syntax error, command unrecognized",
        )),
    }
}

fn creation_result(
    operation: &str,
    path: &str,
    result: Result<(), GridError>,
    success: &str,
) -> CommandResult {
    match result {
        Ok(()) => CommandResult {
            status: CommandStatus::Success,
            message: Some(format_response(
                responses::OK,
                &format!("{}: {}", path, success),
            )),
        },
        Err(e) => failure(operation, path, e),
    }
}

fn failure(operation: &str, path: &str, err: GridError) -> CommandResult {
    handle_error(operation, path, &err);
    CommandResult {
        status: CommandStatus::Failure(err.to_string()),
        message: Some(format_response(error_to_reply_code(&err), &err.to_string())),
    }
}
