//! mdbook-expand-vars - an mdBook preprocessor expanding `{{name}}` placeholders.

mod book;
mod cli;
mod config;
mod error;
mod logger;
mod preprocess;
mod template;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::VarTable;
use std::{io, process::ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        // Capability handshake: every renderer is supported, stdin is not read
        Some(Commands::Supports { renderer, .. }) => {
            debug!("supports"; "renderer `{}`", renderer.as_deref().unwrap_or("<none>"));
            Ok(())
        }
        None => {
            let vars = VarTable::load(cli.vars.as_deref()).context("failed to load variables")?;
            preprocess::process(io::stdin().lock(), io::stdout().lock(), &vars)?;
            Ok(())
        }
    }
}
