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
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Heading printed at the top of the generated PDF.
    pub title: String,
    /// Filename offered in the `Content-Disposition` header.
    pub filename: String,
    /// Keep the dangling "including ." clause when there are no categories.
    pub legacy_empty_clause: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "NBA Criterion 4 Report".into(),
            filename: "nba_report.pdf".into(),
            legacy_empty_clause: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://database.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("report.title", "NBA Criterion 4 Report")?
            .set_default("report.filename", "nba_report.pdf")?
            .set_default("report.legacy_empty_clause", false)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., ACHIEVEMENTS__DATABASE__URL)
            .add_source(Environment::with_prefix("ACHIEVEMENTS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
