use std::env;
use std::time::Duration;

use crate::core::chunk::DEFAULT_MAX_LEN;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Executable used to run the scraper scripts.
    pub scraper_program: String,
    pub scraper_script: String,
    pub scraper_debug_script: String,
    pub scraper_timeout: Duration,
    /// Relay scraper stderr into chat.
    pub debug_mode: bool,
    pub cooldown: Duration,
    pub max_message_len: usize,
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper_program: "python3".to_string(),
            scraper_script: "scraper.py".to_string(),
            scraper_debug_script: "scraper-debug.py".to_string(),
            scraper_timeout: Duration::from_secs(60),
            debug_mode: false,
            cooldown: Duration::from_millis(3000),
            max_message_len: DEFAULT_MAX_LEN,
            prefix: "!kimi".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|name| env::var(name).ok())
}

/// Build a config from any variable source (the environment in production).
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let defaults = Config::default();
    let string = |name: &'static str, default: String| -> Result<String, ConfigError> {
        match lookup(name) {
            None => Ok(default),
            Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { name }),
            Some(v) => Ok(v.trim().to_string()),
        }
    };
    let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
        match lookup(name) {
            None => Ok(default),
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value: v }),
        }
    };

    let max_message_len = number("KIMISA_MAX_MESSAGE_LEN", defaults.max_message_len as u64)?;
    if max_message_len == 0 {
        return Err(ConfigError::InvalidNumber {
            name: "KIMISA_MAX_MESSAGE_LEN",
            value: "0".to_string(),
        });
    }

    Ok(Config {
        scraper_program: string("KIMISA_SCRAPER_PROGRAM", defaults.scraper_program)?,
        scraper_script: string("KIMISA_SCRAPER_SCRIPT", defaults.scraper_script)?,
        scraper_debug_script: string(
            "KIMISA_SCRAPER_DEBUG_SCRIPT",
            defaults.scraper_debug_script,
        )?,
        scraper_timeout: Duration::from_secs(number(
            "KIMISA_SCRAPER_TIMEOUT_SECS",
            defaults.scraper_timeout.as_secs(),
        )?),
        debug_mode: lookup("DEBUG_MODE").is_some_and(|v| v.trim() == "true"),
        cooldown: Duration::from_millis(number(
            "KIMISA_COOLDOWN_MS",
            defaults.cooldown.as_millis() as u64,
        )?),
        max_message_len: max_message_len as usize,
        prefix: string("KIMISA_PREFIX", defaults.prefix)?.to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("KIMISA_SCRAPER_PROGRAM", "/usr/bin/python3.11"),
            ("KIMISA_COOLDOWN_MS", "500"),
            ("KIMISA_MAX_MESSAGE_LEN", "1000"),
            ("DEBUG_MODE", "true"),
            ("KIMISA_PREFIX", "!Frame"),
        ])
        .unwrap();
        assert_eq!(config.scraper_program, "/usr/bin/python3.11");
        assert_eq!(config.cooldown, Duration::from_millis(500));
        assert_eq!(config.max_message_len, 1000);
        assert!(config.debug_mode);
        assert_eq!(config.prefix, "!frame");
    }

    #[test]
    fn debug_mode_needs_literal_true() {
        assert!(!config_from(&[("DEBUG_MODE", "1")]).unwrap().debug_mode);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = config_from(&[("KIMISA_COOLDOWN_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("KIMISA_COOLDOWN_MS"));
        assert!(config_from(&[("KIMISA_MAX_MESSAGE_LEN", "0")]).is_err());
    }

    #[test]
    fn rejects_empty_strings() {
        assert!(matches!(
            config_from(&[("KIMISA_SCRAPER_SCRIPT", "  ")]),
            Err(ConfigError::Empty { name: "KIMISA_SCRAPER_SCRIPT" })
        ));
    }
}
