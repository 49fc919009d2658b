//! User-facing session output
//!
//! Everything the session prints goes through here, to any `io::Write`.
//! Colors come from `colored` and respect NO_COLOR, CLICOLOR, CLICOLOR_FORCE.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

use crate::application::ApplicationError;

const HELP: &str = "\
Available commands:
  list files [<folder>]
  create file <filename>
  read file <filename>
  delete file <filename>
  create folder <foldername>
  move file <source> to <destination>
  help
  exit";

/// The filesystem operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    CreateFile,
    ReadFile,
    DeleteFile,
    CreateFolder,
    Move,
}

impl Operation {
    fn missing_subject(self) -> &'static str {
        match self {
            Operation::List => "directory",
            Operation::CreateFile | Operation::ReadFile | Operation::DeleteFile => "file",
            Operation::CreateFolder => "folder",
            Operation::Move => "source file",
        }
    }

    fn existing_subject(self) -> &'static str {
        match self {
            Operation::CreateFile => "file",
            Operation::CreateFolder => "folder",
            Operation::Move => "destination",
            Operation::List | Operation::ReadFile | Operation::DeleteFile => "path",
        }
    }
}

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "File manager started.".cyan().bold())?;
    writeln!(out, "Type 'help' to see available commands.")?;
    writeln!(out)
}

/// Print prompt without newline (cyan)
pub fn prompt(out: &mut impl Write, prompt: &str) -> io::Result<()> {
    write!(out, "{} ", prompt.cyan())?;
    out.flush()
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", HELP)
}

pub fn goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Goodbye!")
}

pub fn unknown(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Unknown command. Type 'help' for assistance.")
}

/// Print directory entries, one per line, in the order given.
pub fn listing(out: &mut impl Write, names: &[String]) -> io::Result<()> {
    if names.is_empty() {
        return writeln!(out, "Directory is empty.");
    }
    writeln!(out, "{}", "Files and folders:".cyan().bold())?;
    for name in names {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}

pub fn contents(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", "File contents:".cyan().bold())?;
    writeln!(out, "{}", text)
}

/// Print success status (green checkmark)
pub fn success(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Print warning (yellow "Warning:" prefix)
pub fn warning(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "Warning".yellow(), msg)
}

/// Print error (red bold "error:" prefix)
pub fn error(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "error".red().bold(), msg)
}

/// Report a failed operation. Distinct kinds are warnings, the rest errors.
pub fn failure(out: &mut impl Write, op: Operation, err: &ApplicationError) -> io::Result<()> {
    match err {
        ApplicationError::NotFound(path) => warning(
            out,
            &format!("{} not found: {}", op.missing_subject(), path.display()),
        ),
        ApplicationError::AlreadyExists(path) => warning(
            out,
            &format!("{} already exists: {}", op.existing_subject(), path.display()),
        ),
        ApplicationError::Domain(e) => warning(out, e),
        ApplicationError::OperationFailed { .. } | ApplicationError::Config { .. } => {
            error(out, err)
        }
    }
}
