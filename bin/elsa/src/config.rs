use std::path::PathBuf;

use crate::error::ConfigError;

pub const USERNAME_VARIABLE: &str = "TAPO_USERNAME";
pub const PASSWORD_VARIABLE: &str = "TAPO_PASSWORD";
pub const ADDRESSES_VARIABLE: &str = "TAPO_P300_IPS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub addresses: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVariable(name))
        };

        let username = required(USERNAME_VARIABLE)?;
        let password = required(PASSWORD_VARIABLE)?;

        let addresses = parse_addresses(&required(ADDRESSES_VARIABLE)?);
        if addresses.is_empty() {
            return Err(ConfigError::EmptyAddressList);
        }

        Ok(Self {
            username,
            password,
            addresses,
        })
    }
}

/// Splits a comma separated address list, dropping blank entries.
pub fn parse_addresses(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shell startup files holding the address list when none are given.
pub fn default_rc_files() -> Result<Vec<PathBuf>, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::MissingVariable("HOME"))?;
    Ok(vec![PathBuf::from(home).join(".bashrc")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            ("TAPO_USERNAME", "user@example.com"),
            ("TAPO_PASSWORD", "secret"),
            ("TAPO_P300_IPS", " 192.168.100.120, ,192.168.100.121,"),
        ]))
        .unwrap();

        assert_eq!(config.username, "user@example.com");
        assert_eq!(config.password, "secret");
        assert_eq!(config.addresses, ["192.168.100.120", "192.168.100.121"]);
    }

    #[test]
    fn test_missing_credentials() {
        let result = Config::from_lookup(lookup(&[
            ("TAPO_USERNAME", "user@example.com"),
            ("TAPO_P300_IPS", "192.168.100.120"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable("TAPO_PASSWORD"))
        ));

        let result = Config::from_lookup(lookup(&[
            ("TAPO_USERNAME", ""),
            ("TAPO_PASSWORD", "secret"),
            ("TAPO_P300_IPS", "192.168.100.120"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable("TAPO_USERNAME"))
        ));
    }

    #[test]
    fn test_missing_addresses() {
        let result = Config::from_lookup(lookup(&[
            ("TAPO_USERNAME", "user@example.com"),
            ("TAPO_PASSWORD", "secret"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable("TAPO_P300_IPS"))
        ));

        let result = Config::from_lookup(lookup(&[
            ("TAPO_USERNAME", "user@example.com"),
            ("TAPO_PASSWORD", "secret"),
            ("TAPO_P300_IPS", " , ,"),
        ]));
        assert!(matches!(result, Err(ConfigError::EmptyAddressList)));
    }
}
