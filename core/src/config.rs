use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DATA_DIR_ENV: &str = "MOODLOG_DIR";
pub const LOG_LEVEL_ENV: &str = "MOODLOG_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DIR_NAME: &str = ".moodlog";

/// Where data and logs live, and how chatty the logs are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Explicit values win, then the environment, then defaults.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Result<Self> {
        let env_dir = env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let env_level = env::var(LOG_LEVEL_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::from_sources(data_dir, log_level, env_dir, env_level, dirs::home_dir())
    }

    fn from_sources(
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        env_dir: Option<PathBuf>,
        env_level: Option<String>,
        home_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = match data_dir.or(env_dir) {
            Some(dir) => dir,
            None => home_dir
                .ok_or_else(|| anyhow!("Could not determine home directory"))?
                .join(DEFAULT_DIR_NAME),
        };
        let log_level = log_level
            .or(env_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self { data_dir, log_level })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
