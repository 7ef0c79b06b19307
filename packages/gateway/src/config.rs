use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Flat directory holding one file per stored asset.
    pub assets_root: PathBuf,
    /// Scheme, host and port used in retrieval URLs.
    /// Defaults to `http://localhost:<server.port>`.
    #[serde(default)]
    pub public_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://assetgate.db?mode=rwc")?
            .set_default("storage.assets_root", "./assets")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., ASSETGATE__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("ASSETGATE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Origin that retrieval URLs are built on.
    pub fn public_origin(&self) -> String {
        self.storage
            .public_origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server.port))
    }
}
