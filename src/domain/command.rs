//! Command model and line parser
//!
//! Input lines are matched against a closed set of keywords by prefix.
//! There is no quoting: a filename containing `" to "` cannot be moved, and a
//! file literally named like a keyword is ambiguous.

use crate::domain::DomainError;

/// Separator between source and destination of `move file`.
pub const MOVE_DELIMITER: &str = " to ";

const LIST_FILES: &str = "list files";
const CREATE_FILE: &str = "create file";
const READ_FILE: &str = "read file";
const DELETE_FILE: &str = "delete file";
const CREATE_FOLDER: &str = "create folder";
const MOVE_FILE: &str = "move file";

/// A parsed command line. Arguments are kept exactly as extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List directory entries; `None` means the working directory.
    List { dir: Option<String> },
    CreateFile(String),
    ReadFile(String),
    DeleteFile(String),
    CreateFolder(String),
    Move { source: String, destination: String },
    Help,
    Exit,
    /// Anything that matched no keyword (normalized text).
    Unknown(String),
}

/// Trim surrounding whitespace and lowercase the whole line.
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Parse one raw input line.
///
/// The line is normalized first. Keywords are checked in a fixed order and
/// match when the line equals the keyword or continues with whitespace.
/// Single-argument commands take the trimmed remainder, which may be empty.
///
/// # Errors
/// Returns [`DomainError::InvalidMoveFormat`] when `move file` is not followed
/// by exactly `<source> to <destination>`.
pub fn parse(line: &str) -> Result<Command, DomainError> {
    let line = normalize(line);

    if line == "exit" {
        return Ok(Command::Exit);
    }
    if line == "help" {
        return Ok(Command::Help);
    }
    if let Some(rest) = strip_keyword(&line, LIST_FILES) {
        let dir = (!rest.is_empty()).then(|| rest.to_string());
        return Ok(Command::List { dir });
    }
    if let Some(rest) = strip_keyword(&line, CREATE_FILE) {
        return Ok(Command::CreateFile(rest.to_string()));
    }
    if let Some(rest) = strip_keyword(&line, READ_FILE) {
        return Ok(Command::ReadFile(rest.to_string()));
    }
    if let Some(rest) = strip_keyword(&line, DELETE_FILE) {
        return Ok(Command::DeleteFile(rest.to_string()));
    }
    if let Some(rest) = strip_keyword(&line, CREATE_FOLDER) {
        return Ok(Command::CreateFolder(rest.to_string()));
    }
    if let Some(rest) = strip_keyword(&line, MOVE_FILE) {
        return parse_move(rest);
    }

    Ok(Command::Unknown(line))
}

fn parse_move(rest: &str) -> Result<Command, DomainError> {
    let parts: Vec<&str> = rest.split(MOVE_DELIMITER).collect();
    match parts.as_slice() {
        [source, destination] => Ok(Command::Move {
            source: (*source).to_string(),
            destination: (*destination).to_string(),
        }),
        _ => Err(DomainError::InvalidMoveFormat(rest.to_string())),
    }
}

/// Return the trimmed remainder if `line` starts with `keyword` as a whole word.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
