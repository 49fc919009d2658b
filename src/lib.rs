//! filebot: an interactive file manager driven by plain-text commands
//!
//! Layers, innermost first:
//! - `domain`: command model and line parser
//! - `application`: filesystem operations, reporting, the session loop
//! - `infrastructure`: filesystem primitives and service wiring
//! - `cli`: process flags, startup and exit codes

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
