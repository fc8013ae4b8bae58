//! MHHS interface catalogue browser.

use clap::{ColorChoice, Parser};
use mhhs_cli::context::Locations;
use mhhs_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_codes, run_export, run_favorite, run_form, run_list, run_show, run_suggest,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let locations = Locations {
        catalogue: cli.locations.catalogue.clone(),
        config: cli.locations.config.clone(),
        preferences: cli.locations.prefs_dir.clone(),
    };
    let exit_code = match &cli.command {
        Command::List(args) => report(run_list(&locations, args)),
        Command::Show { id } => report(run_show(&locations, id)),
        Command::Codes { term } => report(run_codes(&locations, term.as_deref())),
        Command::Suggest { partial } => report(run_suggest(&locations, partial)),
        Command::Form { id } => report(run_form(&locations, id)),
        Command::Export(args) => match run_export(&locations, args) {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(error) => report(Err(error)),
        },
        Command::Favorite { id } => report(run_favorite(&locations, id)),
    };
    std::process::exit(exit_code);
}

fn report(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
