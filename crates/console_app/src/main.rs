mod cli;
mod platform;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use platform::config::ConsoleConfig;
use platform::logging::{self, LogDestination};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::load(&cli).context("failed to load console config")?;

    logging::initialize(
        console_logging::parse_level(&config.log_level),
        LogDestination::from_option(config.log_file.as_deref()),
    );

    platform::run_app(config)
}
