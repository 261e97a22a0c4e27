//! Handles settings for the application. Configuration is read from
//! `settings.toml` (optional) and overridden by `SPLITLEDGER__*` environment
//! variables, e.g. `SPLITLEDGER__SERVER__PORT=8080`.
//!
//! See `settings.toml` for the configuration.
use std::path::PathBuf;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "splitledger", about = "Shared-expense ledger server")]
pub struct Cli {
    /// Path to the settings file
    #[arg(long, env = "SPLITLEDGER_CONFIG", default_value = "settings.toml")]
    pub config: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize)]
pub struct Ledger {
    #[serde(default = "default_lock_after_days")]
    pub lock_after_days: i64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            lock_after_days: default_lock_after_days(),
            timezone: default_timezone(),
        }
    }
}

fn default_lock_after_days() -> i64 {
    engine::ledger::DEFAULT_LOCK_AFTER_DAYS
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub ledger: Ledger,
}

impl Settings {
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(cli.config.as_path()).required(false))
            .add_source(Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn sqlite_database_is_parsed() {
        let settings = parse(
            r#"
            [server]
            port = 8080
            database = { sqlite = "./ledger.db" }

            [ledger]
            timezone = "Europe/Rome"
            "#,
        );
        let server = settings.server.unwrap();
        assert_eq!(server.port, 8080);
        assert!(matches!(server.database, Database::Sqlite(path) if path == "./ledger.db"));
        assert_eq!(settings.ledger.timezone, "Europe/Rome");
        assert_eq!(settings.ledger.lock_after_days, 7);
        assert_eq!(settings.app.level, "info");
    }

    #[test]
    fn memory_database_and_defaults() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            "#,
        );
        let server = settings.server.unwrap();
        assert_eq!(server.port, 3000);
        assert!(server.bind.is_none());
        assert!(matches!(server.database, Database::Memory));
    }
}
