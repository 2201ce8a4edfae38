//! Module `commands`
//!
//! Defines the command parsing logic and the data structures used to
//! represent commands, their status, and results.

/// A command parsed from a client line.
///
/// Commands that require a path store it as a `String`.
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Touch(String),  // Create an empty file
    Mkd(String),    // Create a directory; parents must exist
    Mkds(String),   // Create a directory and any missing parents
    Exists(String), // Report whether a path exists
    Stat(String),   // Show the stored record
    List(String),   // List direct children
    Unknown,
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line received from a client into the `Command` enum.
///
/// Returns `Unknown` if a known command is missing its path argument.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "QUIT" | "Q" => Command::Quit,
        "TOUCH" if !arg.is_empty() => Command::Touch(arg.to_string()),
        "MKD" if !arg.is_empty() => Command::Mkd(arg.to_string()),
        "MKDS" if !arg.is_empty() => Command::Mkds(arg.to_string()),
        "EXISTS" if !arg.is_empty() => Command::Exists(arg.to_string()),
        "STAT" if !arg.is_empty() => Command::Stat(arg.to_string()),
        "LIST" if !arg.is_empty() => Command::List(arg.to_string()),
        "LIST" => Command::List("/".to_string()),
        _ => Command::Unknown,
    }
}
