//! Command dispatch and rendering

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{ActiveView, SelectionState};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::{Reply, Session, HELP};
use crate::config::{global_config_path, Settings};
use crate::domain::ListRegistry;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Session { script }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd_session(&settings, script.as_deref())
        }
        Some(Commands::Lists) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd_lists(&settings)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                let settings = Settings::load(cli.config.as_deref())?;
                output::info(&settings.to_toml()?);
                Ok(())
            }
            ConfigCommands::Template => {
                output::info(&Settings::template());
                Ok(())
            }
            ConfigCommands::Path => cmd_config_path(cli.config.as_deref()),
        },
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Ok(()),
    }
}

#[instrument(skip(settings))]
fn cmd_session(settings: &Settings, script: Option<&Path>) -> CliResult<()> {
    let registry = settings.build_registry()?;
    let mut session = Session::new(registry);

    match script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| CliError::io(format!("open script {}", path.display()), e))?;
            run_session(&mut session, BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                output::hint(&"type 'help' for commands");
                render_lists(&session);
            }
            run_session(&mut session, stdin.lock(), interactive)
        }
    }
}

/// Feed every line of `reader` to the session, rendering replies and view
/// updates. Command errors are reported and the session continues.
pub fn run_session<R: BufRead>(session: &mut Session, reader: R, interactive: bool) -> CliResult<()> {
    if interactive {
        output::prompt(&">");
    }
    for line in reader.lines() {
        let line = line.map_err(|e| CliError::io("read session input", e))?;
        match session.execute_line(&line) {
            Ok(Some(Reply::Quit)) => break,
            Ok(Some(reply)) => render_reply(reply),
            Ok(None) => {}
            Err(e) => output::error(&e),
        }
        for view in session.take_updates() {
            render_view(&view);
        }
        if interactive {
            output::prompt(&">");
        }
    }
    debug!("run_session: finished");
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_lists(settings: &Settings) -> CliResult<()> {
    let registry = settings.build_registry()?;
    render_registry(&registry);
    Ok(())
}

fn cmd_config_path(explicit: Option<&Path>) -> CliResult<()> {
    output::header(&"Config locations");
    match global_config_path() {
        Some(p) => output::detail(&format!(
            "global:   {}{}",
            p.display(),
            if p.exists() { "" } else { " (not found)" }
        )),
        None => output::detail(&"global:   (no config directory)"),
    }
    if let Some(p) = explicit {
        output::detail(&format!("explicit: {}", p.display()));
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn render_lists(session: &Session) {
    render_registry(session.controller().registry());
}

fn render_registry(registry: &ListRegistry) {
    for (index, list) in registry.lists().iter().enumerate() {
        output::list_row(
            registry.selected_index() == Some(index),
            &format!("[{index}] {list} ({})", list.len()),
        );
        for restaurant in list {
            output::detail(&format!("    {restaurant}"));
        }
    }
}

fn render_view(view: &ActiveView) {
    match (view.state, view.list_name.as_deref()) {
        (SelectionState::HasSelection(index), Some(name)) => {
            output::header(&format!("[{index}] {name}"));
            if view.restaurants.is_empty() {
                output::hint(&"(empty)");
            }
            for restaurant in &view.restaurants {
                output::detail(restaurant);
            }
            if !view.actions_enabled {
                output::hint(&"add/merge need at least two lists");
            }
        }
        _ => output::hint(&"no list selected"),
    }
}

fn render_reply(reply: Reply) {
    match reply {
        Reply::Lists(rows) => {
            for row in rows {
                output::list_row(
                    row.selected,
                    &format!("[{}] {} ({})", row.index, row.name, row.len),
                );
            }
        }
        Reply::View(view) => render_view(&view),
        Reply::Selected(Some(name)) => output::action("Selected", &name),
        Reply::Selected(None) => output::action("Selected", &"none"),
        Reply::Created { index, name } => output::success(&format!("created [{index}] {name}")),
        Reply::Added(restaurant) => output::success(&format!("added {restaurant}")),
        Reply::Duplicate(restaurant) => output::warning(&format!(
            "{} is already in this list",
            restaurant.name()
        )),
        Reply::Merged(outcome) => {
            output::success(&format!(
                "merged {} ({} added, {} already present)",
                outcome.source_name, outcome.added, outcome.skipped
            ));
        }
        Reply::MergeCancelled => output::hint(&"merge cancelled"),
        Reply::Help => output::info(HELP),
        Reply::Quit => {}
    }
}
