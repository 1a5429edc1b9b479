//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::ColorizeService;
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{ColorChoice, Settings};
use crate::infrastructure::{InfraError, RealFileSystem};
use crate::render::AnsiStyler;

pub fn execute(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell);
        return Ok(());
    }
    if cli.init_config {
        return write_stdout(&Settings::template());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    if cli.show_config {
        return write_stdout(&settings.to_toml()?);
    }

    let file = cli
        .file
        .as_deref()
        .ok_or_else(|| CliError::Usage("missing <FILE> argument".into()))?;
    apply_color_choice(cli.color.unwrap_or(settings.color));

    let text = colorize(file, &settings, cli.markers)?;
    write_stdout(&text)
}

#[instrument(level = "debug", skip(settings))]
fn colorize(file: &Path, settings: &Settings, markers: bool) -> CliResult<String> {
    let service = ColorizeService::new(
        Arc::new(RealFileSystem),
        settings.classifier()?,
        settings.indent,
    );
    let text = if markers {
        service.markers(file)?
    } else {
        service.colorize(file, &AnsiStyler::new(settings.palette()?))?
    };
    debug!(bytes = text.len(), "colorized");
    Ok(text)
}

fn apply_color_choice(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
}

fn write_stdout(text: &str) -> CliResult<()> {
    output::document(text).map_err(|e| InfraError::io("write to stdout", e))?;
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
