//! rFellowship library root.
//! Exposes the CLI parser, the high-level run() function, the access gate,
//! the event time resolver and the local community store.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::date::Clock;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, clock),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg, clock),
        Commands::Logout => cli::commands::logout::handle(cfg, clock),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg, clock),
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command, cfg, clock),
        Commands::Upgrade { .. } => cli::commands::upgrade::handle(&cli.command, cfg, clock),
        Commands::Events { .. } => cli::commands::events::handle(&cli.command, cfg, clock),
        Commands::Feed { .. } => cli::commands::feed::handle(&cli.command, cfg, clock),
        Commands::Pray { .. } => cli::commands::pray::handle(&cli.command, cfg, clock),
        Commands::Devotional { .. } => cli::commands::devotional::handle(&cli.command, cfg, clock),
        Commands::Members { .. } => cli::commands::members::handle(&cli.command, cfg, clock),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg, clock),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let clock = Clock::from_override(cli.now.as_deref())?;

    dispatch(&cli, &cfg, &clock)
}
