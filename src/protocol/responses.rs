//! Response handling
//!
//! Defines reply codes and formatting.

/// Reply codes
pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const STATUS: u16 = 213;
pub const ACTION_OK: u16 = 250;
pub const ALREADY_EXISTS: u16 = 450;
pub const LOCAL_ERROR: u16 = 451;
pub const SYNTAX_ERROR: u16 = 500;
pub const SYNTAX_ERROR_IN_ARGS: u16 = 501;
pub const ACTION_NOT_TAKEN: u16 = 550;

/// Format a single-line reply
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

/// Format a multi-line reply: one `code-line` per entry, then a final `code message`.
pub fn format_multiline(code: u16, lines: &[String], message: &str) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!("{}-{}\r\n", code, line));
    }
    out.push_str(&format_response(code, message));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_multiline() {
        let lines = vec!["/d/1".to_string(), "/d/2".to_string()];
        assert_eq!(
            format_multiline(ACTION_OK, &lines, "2 entries"),
            "250-/d/1\r\n250-/d/2\r\n250 2 entries\r\n"
        );
        assert_eq!(format_multiline(ACTION_OK, &[], "0 entries"), "250 0 entries\r\n");
    }
}
