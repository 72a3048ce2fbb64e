use std::net::SocketAddr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ConfigsError;

const ENV_PREFIX: &str = "COOKBOOK";
const ENV_SELECTOR: &str = "COOKBOOK_ENV";
const CONFIG_DIR: &str = "config";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cors: CorsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigsError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigsError::Invalid(format!("server address: {e}")))
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// Without a URL the server runs on the in-memory store.
    pub url: Option<SecretString>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseSettings {
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().map(|url| url.expose_secret())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` wins when set.
    pub filter: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads settings from the config directory and the environment.
    pub fn load() -> Result<Self, ConfigsError> {
        dotenvy::dotenv().ok();
        let environment = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".into());

        let builder = Self::defaults()?
            .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins")
                    .try_parsing(true),
            );

        let settings = Self::build(builder)?;
        tracing::debug!(%environment, "configuration loaded");
        Ok(settings)
    }

    /// Builds settings from defaults overlaid with a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigsError> {
        Self::build(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigsError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 5)?
            .set_default("database.run_migrations", true)?
            .set_default("cors.origins", vec!["http://localhost:3000"])?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigsError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigsError> {
        if self.database.max_connections == 0 {
            return Err(ConfigsError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }
        if self.database.url().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigsError::Invalid("database.url is empty".into()));
        }
        Ok(())
    }
}
