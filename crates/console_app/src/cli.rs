use std::path::PathBuf;

use clap::Parser;

/// Terminal console for the peerwire download engine.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "peerwire-console", version, about)]
pub struct Cli {
    /// Engine address, e.g. http://localhost:8080
    #[arg(long)]
    pub server: Option<String>,

    /// RON config file. Defaults to ./peerwire-console.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Status poll period in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Start a status request on every tick even if the last one is pending.
    #[arg(long)]
    pub overlapping_polls: bool,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long)]
    pub log_level: Option<String>,
}
