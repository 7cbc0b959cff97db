//! Server configuration, read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEVELOPMENT: &str = "development";
const DEV_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be set in {environment} environment")]
    Missing { name: String, environment: String },

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: String, value: String },
}

/// Where orders and users are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Actor-owned maps; lost on restart.
    Memory,
    Sqlite(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    /// Shared credential for the admin dashboard.
    pub admin_password: String,
    pub poll_interval: Duration,
    pub alert_ceiling: Duration,
    pub bcrypt_cost: u32,
    /// Run the admin dashboard inside the server process.
    pub dashboard_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| DEVELOPMENT.into());

        let admin_password = match var("ADMIN_PASSWORD") {
            Some(password) => password,
            None if environment == DEVELOPMENT => DEV_ADMIN_PASSWORD.into(),
            None => {
                return Err(ConfigError::Missing {
                    name: "ADMIN_PASSWORD".into(),
                    environment,
                })
            }
        };

        let poll_secs: u64 = parse_or(&var, "POLL_INTERVAL_SECS", 30)?;
        if poll_secs == 0 {
            return Err(invalid("POLL_INTERVAL_SECS", "0"));
        }

        let bcrypt_cost: u32 = parse_or(&var, "BCRYPT_COST", 10)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", &bcrypt_cost.to_string()));
        }

        Ok(Self {
            bind_addr: parse_or(&var, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            store: match var("DATABASE_PATH") {
                Some(path) => StoreBackend::Sqlite(PathBuf::from(path)),
                None => StoreBackend::Memory,
            },
            admin_password,
            poll_interval: Duration::from_secs(poll_secs),
            alert_ceiling: Duration::from_secs(parse_or(&var, "ALERT_CEILING_SECS", 20)?),
            bcrypt_cost,
            dashboard_enabled: parse_or(&var, "DASHBOARD_ENABLED", true)?,
            environment,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(name, &raw)),
        None => Ok(default),
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name: name.into(),
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn development_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.alert_ceiling, Duration::from_secs(20));
        assert_eq!(config.bcrypt_cost, 10);
        assert!(config.dashboard_enabled);
    }

    #[test]
    fn production_requires_admin_password() {
        let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                name: "ADMIN_PASSWORD".into(),
                environment: "production".into(),
            }
        );

        let config = load(&[("ENVIRONMENT", "production"), ("ADMIN_PASSWORD", "s3cret")]).unwrap();
        assert_eq!(config.admin_password, "s3cret");
    }

    #[test]
    fn database_path_selects_sqlite() {
        let config = load(&[("DATABASE_PATH", "/var/lib/cafe/orders.db")]).unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Sqlite(PathBuf::from("/var/lib/cafe/orders.db"))
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(matches!(
            load(&[("POLL_INTERVAL_SECS", "soon")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[("POLL_INTERVAL_SECS", "0")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[("BCRYPT_COST", "3")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn dashboard_can_be_disabled() {
        let config = load(&[("DASHBOARD_ENABLED", "false")]).unwrap();
        assert!(!config.dashboard_enabled);
    }
}
