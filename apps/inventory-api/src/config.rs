//! Configuration for the inventory API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    /// Apply pending migrations (and the demo seed) at startup
    pub run_migrations: bool,
    /// Empty means any origin is allowed and mirrored back
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            postgres: PostgresConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
            cors_allowed_origins: parse_origins(&env_or_default("CORS_ALLOWED_ORIGIN", "")),
        })
    }
}

/// Comma separated, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "inventory_api");
                assert_eq!(config.server.port, 3000);
                assert!(config.run_migrations);
                assert!(config.cors_allowed_origins.is_empty());
            },
        );
    }

    #[test]
    fn test_database_url_is_required() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::MissingEnvVar(key)) if key == "DATABASE_URL"
            ));
        });
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("PORT", Some("8080")),
                ("RUN_MIGRATIONS", Some("false")),
                (
                    "CORS_ALLOWED_ORIGIN",
                    Some("http://localhost:5173, https://shop.example.com,"),
                ),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8080);
                assert!(!config.run_migrations);
                assert_eq!(
                    config.cors_allowed_origins,
                    ["http://localhost:5173", "https://shop.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/inventory")),
                ("RUN_MIGRATIONS", Some("sometimes")),
            ],
            || {
                assert!(matches!(
                    Config::from_env(),
                    Err(ConfigError::ParseError { key, .. }) if key == "RUN_MIGRATIONS"
                ));
            },
        );
    }
}
