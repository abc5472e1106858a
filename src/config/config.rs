use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use serde_saphyr::{from_str, to_string};

use crate::errors::{Result, Error, ErrorKind, debug};
use crate::scroll::{THROTTLE_WINDOW_MS, IDLE_WINDOW_MS};
use crate::utils;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            idle_ms: default_idle_ms(),
        }
    }
}

const fn default_throttle_ms() -> u64 {
    THROTTLE_WINDOW_MS
}

const fn default_idle_ms() -> u64 {
    IDLE_WINDOW_MS
}

impl TrackerConfig {
    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn idle_window(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| Error::wrap(e, ErrorKind::Read)
                .with_msg("config: Failed to read file")
                .with_ctx("path", path.display())
            )?;

        let config = Self::parse(&contents)
            .map_err(|e| e.with_ctx("path", path.display()))?;

        debug!(
            path = %path.display(),
            throttle_ms = config.tracker.throttle_ms,
            idle_ms = config.tracker.idle_ms,
            "Loaded config",
        );

        Ok(config)
    }

    /// Loads `path` when given. Without one the default location is used
    /// if it exists, otherwise the built-in defaults.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }

        let path = match utils::get_config_path() {
            Ok(path) => path,
            Err(_) => return Ok(Self::default()),
        };

        match fs::try_exists(&path).await {
            Ok(true) => Self::load(&path).await,
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = from_str(contents)
            .map_err(|e| Error::wrap(e, ErrorKind::Parse)
                .with_msg("config: Failed to parse")
            )?;

        config.validate()?;

        Ok(config)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;

        let contents = to_string(self)
            .map_err(|e| Error::wrap(e, ErrorKind::Write)
                .with_msg("config: Failed to serialize")
            )?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::wrap(e, ErrorKind::Write)
                    .with_msg("config: Failed to create directory")
                    .with_ctx("path", parent.display())
                )?;
        }

        fs::write(path, &contents)
            .await
            .map_err(|e| Error::wrap(e, ErrorKind::Write)
                .with_msg("config: Failed to write file")
                .with_ctx("path", path.display())
            )?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.tracker.idle_ms == 0 {
            return Err(Error::new(ErrorKind::Invalid)
                .with_msg("config: Idle window must be greater than zero")
                .with_ctx("idle_ms", self.tracker.idle_ms));
        }

        Ok(())
    }
}
