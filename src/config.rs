use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_dsn: String,
    #[serde(default)]
    pub environment: Environment,
}

/// Deployment mode. Development responses expose internal error details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{tried}', 'config.yaml', 'config.example.yaml', and NOTE_SERVICE_* variables. \
         Error: {source}"
    )]
    Missing { tried: String, source: envy::Error },
}

const ENV_PREFIX: &str = "NOTE_SERVICE_";

const fn default_port() -> u16 {
    8000
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    parse(path, &contents)
}

fn parse(path: &str, contents: &str) -> Result<Config, ConfigError> {
    serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn load_from_env<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(ENV_PREFIX).from_iter(vars)
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path =
        env::var("NOTE_SERVICE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    load_from_env(env::vars()).map_err(|source| ConfigError::Missing {
        tried: config_path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn yaml_defaults_port_and_environment() {
        let config = parse("test.yaml", "database_dsn: postgres://localhost/notes\n").unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database_dsn, "postgres://localhost/notes");
    }

    #[test]
    fn yaml_reads_development_mode() {
        let config = parse(
            "test.yaml",
            "port: 9000\ndatabase_dsn: postgres://db\nenvironment: development\n",
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.environment.is_development());
    }

    #[test]
    fn yaml_without_dsn_fails() {
        assert!(matches!(
            parse("test.yaml", "port: 1\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_vars_use_prefix() {
        let config = load_from_env(vars(&[
            ("NOTE_SERVICE_DATABASE_DSN", "postgres://env"),
            ("NOTE_SERVICE_PORT", "8080"),
            ("NOTE_SERVICE_ENVIRONMENT", "development"),
            ("DATABASE_DSN", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.database_dsn, "postgres://env");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn env_vars_require_dsn() {
        assert!(load_from_env(vars(&[("NOTE_SERVICE_PORT", "8080")])).is_err());
    }
}
