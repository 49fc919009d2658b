//! Process-level command execution: settings, completions, session startup

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Generator};
use tracing::{debug, instrument};

use crate::application::Session;
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Apply command line flags on top of loaded settings.
pub fn apply_cli_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(dir) = &cli.working_dir {
        settings.working_dir = Some(dir.clone());
    }
    if cli.no_banner {
        settings.banner = false;
    }
    settings
}

/// Execute the process: completions, config display, or an interactive session.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        return Ok(());
    }

    let settings = Settings::load().map_err(InfraError::from)?;
    let settings = apply_cli_overrides(settings, cli);
    debug!("settings: {:?}", settings);

    if !settings.color {
        colored::control::set_override(false);
    }

    if cli.show_config {
        output::info(&settings.to_toml().map_err(InfraError::from)?);
        return Ok(());
    }

    if let Some(dir) = &settings.working_dir {
        if !dir.is_dir() {
            return Err(CliError::InvalidArgs(format!(
                "working directory does not exist: {}",
                dir.display()
            )));
        }
    }

    run_session(ServiceContainer::new(settings))
}

#[instrument(skip(container))]
fn run_session(container: ServiceContainer) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(container.file_ops(), stdin.lock(), stdout.lock())
        .with_prompt(container.settings.prompt.clone());

    if container.settings.banner {
        session
            .banner()
            .map_err(|e| InfraError::io("write banner", e))?;
    }
    session
        .run()
        .map_err(|e| InfraError::io("interactive session", e))?;
    Ok(())
}
