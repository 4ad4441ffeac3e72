//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the log subscriber
//! - Formats output for human consumption
//!
//! Errors are returned to `main`, which prints them and exits with status 1.

use super::handlers;
use super::setup::{parse_cli, Commands, ConfigCommands};
use creelapp::error::Result;
use creelapp::init::initialize;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    // Needs no data directory
    if let Some(Commands::Config {
        action: Some(ConfigCommands::Gen),
    }) = &cli.command
    {
        handlers::config_template();
        return Ok(());
    }

    let mut ctx = initialize(cli.data.clone())?;
    let api = &mut ctx.api;

    // Naked `creel` lists the log
    let command = cli.command.unwrap_or(Commands::List {
        filters: Default::default(),
        json: false,
    });

    match command {
        Commands::Add { catch, photo } => handlers::add(api, catch, photo),
        Commands::List { filters, json } => handlers::list(api, filters, json),
        Commands::View { selector } => handlers::view(api, &selector),
        Commands::Edit {
            selector,
            catch,
            photo,
        } => handlers::edit(api, &selector, catch, photo),
        Commands::Delete { selector } => handlers::delete(api, &selector),
        Commands::Stats => handlers::stats(api),
        Commands::Photos { filters } => handlers::photos(api, filters),
        Commands::Export { output } => handlers::export(api, &output),
        Commands::Config { .. } => {
            handlers::show_config(api, ctx.config_error.as_deref());
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` applies unless `-v` is given; the default is `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
