//! Interactive dispatch loop
//!
//! Reads one line at a time, parses it, runs the matching operation and
//! reports the outcome. Operation failures are printed and never end the
//! session; only `exit` or end of input does.

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::application::report::{self, Operation};
use crate::application::services::FileOpsService;
use crate::application::ApplicationError;
use crate::domain::{self, Command};

pub const DEFAULT_PROMPT: &str = "filebot>";

/// Loop state owned by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// One interactive session over an input and an output stream.
pub struct Session<R, W> {
    ops: FileOpsService,
    input: R,
    out: W,
    prompt: String,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ops: FileOpsService, input: R, out: W) -> Self {
        Self {
            ops,
            input,
            out,
            prompt: DEFAULT_PROMPT.to_string(),
            state: SessionState::Running,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Consume the session, returning the output stream.
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        report::banner(&mut self.out)
    }

    /// Run until `exit` or end of input.
    ///
    /// # Errors
    /// Only I/O errors on the session's own streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state == SessionState::Running {
            self.step()?;
        }
        debug!("session terminated");
        Ok(())
    }

    /// Prompt, read one line and handle it.
    pub fn step(&mut self) -> io::Result<SessionState> {
        report::prompt(&mut self.out, &self.prompt)?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            debug!("end of input");
            writeln!(self.out)?;
            self.state = SessionState::Terminated;
            return Ok(self.state);
        }
        match String::from_utf8(raw) {
            Ok(line) => self.handle_line(&line),
            Err(e) => {
                debug!("undecodable line: {}", e);
                report::error(&mut self.out, "input line is not valid UTF-8")?;
                Ok(self.state)
            }
        }
    }

    /// Parse and dispatch one input line.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> io::Result<SessionState> {
        match domain::parse(line) {
            Ok(command) => self.dispatch(command)?,
            Err(e) => {
                let err = ApplicationError::from(e);
                report::failure(&mut self.out, Operation::Move, &err)?
            }
        }
        Ok(self.state)
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        debug!("dispatch: {:?}", command);
        let out = &mut self.out;
        match command {
            Command::Exit => {
                self.state = SessionState::Terminated;
                report::goodbye(out)
            }
            Command::Help => report::help(out),
            Command::Unknown(_) => report::unknown(out),
            Command::List { dir } => match self.ops.list(dir.as_deref()) {
                Ok(names) => report::listing(out, &names),
                Err(e) => report::failure(out, Operation::List, &e),
            },
            Command::CreateFile(name) => match self.ops.create_file(&name) {
                Ok(()) => report::success(out, &format!("File '{}' created.", name)),
                Err(e) => report::failure(out, Operation::CreateFile, &e),
            },
            Command::ReadFile(name) => match self.ops.read_file(&name) {
                Ok(text) => report::contents(out, &text),
                Err(e) => report::failure(out, Operation::ReadFile, &e),
            },
            Command::DeleteFile(name) => match self.ops.delete_file(&name) {
                Ok(()) => report::success(out, &format!("File '{}' deleted.", name)),
                Err(e) => report::failure(out, Operation::DeleteFile, &e),
            },
            Command::CreateFolder(name) => match self.ops.create_folder(&name) {
                Ok(()) => report::success(out, &format!("Folder '{}' created.", name)),
                Err(e) => report::failure(out, Operation::CreateFolder, &e),
            },
            Command::Move {
                source,
                destination,
            } => match self.ops.move_path(&source, &destination) {
                Ok(target) => report::success(
                    out,
                    &format!("Moved '{}' to '{}'.", source, target.display()),
                ),
                Err(e) => report::failure(out, Operation::Move, &e),
            },
        }
    }
}
