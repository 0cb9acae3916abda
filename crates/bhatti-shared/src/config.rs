//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub printer: PrinterSettings,
    pub whatsapp: WhatsappSettings,
    pub polling: PollingSettings,
    pub limits: LimitSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub driver: DatabaseDriver,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_expiry_seconds: i64,
    pub issuer: Option<String>,
    #[serde(default)]
    pub admin_uids: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PrinterSettings {
    pub host: Option<String>,
    pub port: u16,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WhatsappSettings {
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub to_number: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    pub interval_secs: u64,
    pub initial_delay_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitSettings {
    pub visit_per_second: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?.build()?.try_deserialize()
    }

    /// Defaults only, without reading files or the environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.admin_uids")
                    .try_parsing(true),
            ))
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "bhatti-server")?
            .set_default("app.request_timeout_secs", 30)?
            .set_default("database.driver", "postgres")?
            .set_default("database.url", "postgres://localhost/urban_bhatti")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("auth.jwt_secret", "change-me")?
            .set_default("auth.token_expiry_seconds", crate::constants::DEFAULT_TOKEN_EXPIRY)?
            .set_default("auth.admin_uids", Vec::<String>::new())?
            .set_default("printer.port", crate::constants::DEFAULT_PRINTER_PORT as i64)?
            .set_default("printer.timeout_ms", 5000)?
            .set_default("whatsapp.to_number", crate::constants::DEFAULT_WHATSAPP_NUMBER)?
            .set_default("whatsapp.base_url", "https://graph.facebook.com/v21.0")?
            .set_default("polling.interval_secs", crate::constants::POLL_INTERVAL_SECS as i64)?
            .set_default("polling.initial_delay_secs", 2)?
            .set_default("polling.request_timeout_secs", 10)?
            .set_default("limits.visit_per_second", 20)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let cfg = AppConfig::defaults().unwrap();
        assert_eq!(cfg.app.port, 8080);
        assert_eq!(cfg.database.driver, DatabaseDriver::Postgres);
        assert_eq!(cfg.printer.port, 9100);
        assert_eq!(cfg.polling.interval_secs, 15);
        assert!(cfg.printer.host.is_none());
        assert!(cfg.auth.admin_uids.is_empty());
        assert!(!cfg.is_production());
    }
}
