//! Logging initialization for peerwire-console.
//!
//! The terminal belongs to the UI, so log records only ever go to a file.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Disabled,
}

impl LogDestination {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => LogDestination::File(path.to_path_buf()),
            None => LogDestination::Disabled,
        }
    }
}

/// Installs the global logger. Failing to create the log file leaves logging
/// off rather than aborting startup.
pub fn initialize(level: LevelFilter, destination: LogDestination) {
    let LogDestination::File(path) = destination else {
        return;
    };
    if level == LevelFilter::Off {
        return;
    }

    let loggers: Vec<Box<dyn SharedLogger>> = match create_file_logger(&path, level, build_config())
    {
        Some(file_logger) => vec![file_logger],
        None => return,
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_disables_logging() {
        assert_eq!(LogDestination::from_option(None), LogDestination::Disabled);
        assert_eq!(
            LogDestination::from_option(Some(Path::new("console.log"))),
            LogDestination::File(PathBuf::from("console.log"))
        );
    }

    #[test]
    fn unwritable_path_yields_no_logger() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("console.log");
        assert!(create_file_logger(&path, LevelFilter::Info, build_config()).is_none());
    }
}
