//! Runtime settings read from the environment.
//!
//! Managed hosts expose MySQL credentials as `MYSQL*` variables; those win over
//! the generic `DB_*` names, which in turn win over local defaults.

use crate::error::ConfigError;
use sqlx::mysql::MySqlConnectOptions;
use std::net::SocketAddr;

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_NAME: &str = "lab5";
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 3001;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connection parameters for the backing MySQL server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Server-level options with no database selected. Used by the bootstrap connection.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options scoped to the target database. Used by the shared pool.
    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.name)
    }
}

/// Which HTTP surfaces are mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Features {
    pub sql_gateway: bool,
    pub patients_api: bool,
    pub cors: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            sql_gateway: true,
            patients_api: true,
            cors: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub listen_host: String,
    pub listen_port: u16,
    pub features: Features,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| -> Option<(String, String)> {
            keys.iter().find_map(|k| {
                lookup(k)
                    .filter(|v| !v.is_empty())
                    .map(|v| (k.to_string(), v))
            })
        };

        let database = DatabaseSettings {
            host: get(&["MYSQLHOST", "DB_HOST"])
                .map(|(_, v)| v)
                .unwrap_or_else(|| DEFAULT_DB_HOST.into()),
            port: parse_or(get(&["MYSQLPORT", "DB_PORT"]), DEFAULT_DB_PORT)?,
            user: get(&["MYSQLUSER", "DB_USER"])
                .map(|(_, v)| v)
                .unwrap_or_else(|| DEFAULT_DB_USER.into()),
            password: get(&["MYSQLPASSWORD", "DB_PASS"])
                .map(|(_, v)| v)
                .unwrap_or_default(),
            name: get(&["MYSQLDATABASE", "DB_NAME"])
                .map(|(_, v)| v)
                .unwrap_or_else(|| DEFAULT_DB_NAME.into()),
            max_connections: parse_or(get(&["DB_MAX_CONNECTIONS"]), DEFAULT_MAX_CONNECTIONS)?,
        };

        Ok(Settings {
            database,
            listen_host: get(&["HOST"])
                .map(|(_, v)| v)
                .unwrap_or_else(|| DEFAULT_LISTEN_HOST.into()),
            listen_port: parse_or(get(&["PORT"]), DEFAULT_LISTEN_PORT)?,
            features: Features {
                sql_gateway: parse_flag(get(&["SQL_GATEWAY_ENABLED"]), true)?,
                patients_api: parse_flag(get(&["PATIENTS_API_ENABLED"]), true)?,
                cors: parse_flag(get(&["CORS_ENABLED"]), true)?,
            },
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.listen_host, self.listen_port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST".into(),
            value: raw,
        })
    }
}

fn parse_or<T: std::str::FromStr>(found: Option<(String, String)>, default: T) -> Result<T, ConfigError> {
    match found {
        Some((key, value)) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(found: Option<(String, String)>, default: bool) -> Result<bool, ConfigError> {
    let Some((key, value)) = found else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
