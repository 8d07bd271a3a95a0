//! staffledger library root.
//! Exposes the CLI parser, the high-level run() function, and the snapshot /
//! ledger logic the commands are built on.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::{Backend, Config};
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Pending => cli::commands::pending::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::CheckId { .. } => cli::commands::check_id::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load(cli.config.as_deref())?;

    // 3️⃣ --store overrides whatever backend is configured
    if let Some(dir) = &cli.store {
        cfg.backend = Backend::Fs;
        cfg.store_dir = Some(dir.clone());
    }

    // 4️⃣ passphrase gate before any remote access
    if !cli.command.is_ungated() {
        crate::core::access::check(&cfg, cli.passphrase.as_deref())?;
    }

    dispatch(&cli, &cfg)
}
