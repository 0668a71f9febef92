use anyhow::Result;

use shooter_status::cli::Command;
use shooter_status::config::AppConfig;
use shooter_status::{build_config, handle_export, handle_shooters, handle_status, handle_sync, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    let config = build_config(&cli);
    execute_command(&cli.command, &config)
}

fn execute_command(command: &Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Sync => handle_sync(config),
        Command::Shooters { filter } => handle_shooters(config, filter.as_deref()),
        Command::Status { public_id } => handle_status(config, public_id),
        Command::Export { match_id } => handle_export(config, match_id),
    }
}
