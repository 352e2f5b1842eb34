//! Runtime configuration: flags override environment, environment overrides
//! defaults.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use fitstock_observability::LogFormat;

use crate::args::Cli;

pub const ENV_LOAD_DELAY_MS: &str = "FITSTOCK_LOAD_DELAY_MS";
pub const ENV_SEED_FILE: &str = "FITSTOCK_SEED_FILE";
pub const ENV_LOG_FORMAT: &str = "FITSTOCK_LOG_FORMAT";

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidEnv { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub load_delay: Duration,
    pub seed_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub fail_load: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            load_delay: DEFAULT_LOAD_DELAY,
            seed_file: None,
            log_format: LogFormat::Text,
            fail_load: false,
        }
    }
}

impl AdminConfig {
    /// Resolve from flags plus an environment lookup (`std::env::var` in the binary).
    pub fn resolve<E>(cli: &Cli, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let load_delay = match cli.load_delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => match env(ENV_LOAD_DELAY_MS) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ConfigError::InvalidEnv {
                        key: ENV_LOAD_DELAY_MS,
                        message: e.to_string(),
                    })?,
                None => defaults.load_delay,
            },
        };

        let seed_file = cli
            .seed_file
            .clone()
            .or_else(|| env(ENV_SEED_FILE).filter(|p| !p.trim().is_empty()).map(PathBuf::from));

        let log_format = match cli.log_format {
            Some(format) => format,
            None => match env(ENV_LOG_FORMAT) {
                Some(raw) => raw
                    .parse::<LogFormat>()
                    .map_err(|e| ConfigError::InvalidEnv {
                        key: ENV_LOG_FORMAT,
                        message: e.to_string(),
                    })?,
                None => defaults.log_format,
            },
        };

        Ok(Self {
            load_delay,
            seed_file,
            log_format,
            fail_load: cli.fail_load,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let config = AdminConfig::resolve(&Cli::default(), env_of(&[])).unwrap();
        assert_eq!(config, AdminConfig::default());
    }

    #[test]
    fn env_fills_in_unset_flags() {
        let env = env_of(&[
            (ENV_LOAD_DELAY_MS, "25"),
            (ENV_SEED_FILE, "/tmp/seed.json"),
            (ENV_LOG_FORMAT, "json"),
        ]);
        let config = AdminConfig::resolve(&Cli::default(), env).unwrap();
        assert_eq!(config.load_delay, Duration::from_millis(25));
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn flags_win_over_env() {
        let cli = Cli {
            load_delay_ms: Some(0),
            log_format: Some(LogFormat::Text),
            ..Cli::default()
        };
        let env = env_of(&[(ENV_LOAD_DELAY_MS, "900"), (ENV_LOG_FORMAT, "json")]);
        let config = AdminConfig::resolve(&cli, env).unwrap();
        assert_eq!(config.load_delay, Duration::ZERO);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn malformed_env_is_an_error() {
        let err = AdminConfig::resolve(&Cli::default(), env_of(&[(ENV_LOAD_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: ENV_LOAD_DELAY_MS, .. }));
    }
}
