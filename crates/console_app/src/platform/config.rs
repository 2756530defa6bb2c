use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console_engine::{ClientSettings, PollPolicy, PollSettings, DEFAULT_SERVER};
use console_logging::console_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILENAME: &str = "peerwire-console.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: String,
    pub poll_interval_ms: u64,
    pub poll_policy: PollPolicy,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// `None` disables file logging.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            poll_interval_ms: 800,
            poll_policy: PollPolicy::SingleFlight,
            connect_timeout_ms: 5_000,
            request_timeout_ms: 10_000,
            log_file: Some(PathBuf::from("./peerwire-console.log")),
            log_level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Resolves the effective configuration: file (explicit or default
    /// location), then command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        console_info!("Loaded console config from {:?}", path);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(server) = &cli.server {
            self.server = server.clone();
        }
        if let Some(interval) = cli.poll_interval_ms {
            self.poll_interval_ms = interval;
        }
        if cli.overlapping_polls {
            self.poll_policy = PollPolicy::Overlapping;
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 || self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        self.client_settings().map(|_| ())
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        let settings = ClientSettings::parse(&self.server)
            .map_err(|err| ConfigError::Invalid(format!("server {:?}: {}", self.server, err)))?;
        Ok(ClientSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..settings
        })
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            policy: self.poll_policy,
        }
    }
}
