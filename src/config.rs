use std::env;
use std::path::PathBuf;

use log::Level;

use crate::errors::ConfigError;
use crate::recording::EncodePolicy;

pub const RECORDING_PATH: &str = "TABLO_RECORDING_PATH";
pub const ENCODE_POLICY: &str = "TABLO_ENCODE_POLICY";
pub const PRETTY: &str = "TABLO_PRETTY";
pub const LOG_LEVEL: &str = "TABLO_LOG_LEVEL";

/// Returns the value of the named environment variable, if it's set and
/// not blank.
pub fn get_variable(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Settings for re-encoding a recording document.
#[derive(Clone, Debug, PartialEq)]
pub struct RecodeConfig {
    /// File to read; standard input when unset.
    pub input: Option<PathBuf>,
    pub policy: EncodePolicy,
    pub pretty: bool,
    pub log_level: Level,
}

impl Default for RecodeConfig {
    fn default() -> Self {
        RecodeConfig {
            input: None,
            policy: EncodePolicy::default(),
            pretty: false,
            log_level: Level::Info,
        }
    }
}

impl RecodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        RecodeConfig::from_lookup(get_variable)
    }

    /// Builds the configuration from any source of variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = RecodeConfig::default();

        config.input = lookup(RECORDING_PATH).map(PathBuf::from);

        if let Some(policy) = lookup(ENCODE_POLICY) {
            config.policy = policy.parse()?;
        }

        if let Some(pretty) = lookup(PRETTY) {
            config.pretty = parse_flag(PRETTY, &pretty)?;
        }

        if let Some(level) = lookup(LOG_LEVEL) {
            config.log_level = log::parse_level(&level).ok_or(ConfigError::InvalidValue {
                name: LOG_LEVEL,
                value: level,
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            name,
            value: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();

        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = RecodeConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, RecodeConfig::default());
        assert_eq!(config.policy, EncodePolicy::Abort);
    }

    #[test]
    fn variables_override_defaults() {
        let config = RecodeConfig::from_lookup(lookup(&[
            (RECORDING_PATH, "tests/movie_recording.json"),
            (ENCODE_POLICY, "skip"),
            (PRETTY, "1"),
            (LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("tests/movie_recording.json")));
        assert_eq!(config.policy, EncodePolicy::SkipFailed);
        assert!(config.pretty);
        assert_eq!(config.log_level, Level::Debug);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for &(name, value) in &[(ENCODE_POLICY, "sometimes"), (PRETTY, "yes"), (LOG_LEVEL, "loud")] {
            assert!(
                RecodeConfig::from_lookup(lookup(&[(name, value)])).is_err(),
                "{}={} must be rejected",
                name,
                value
            );
        }
    }
}
