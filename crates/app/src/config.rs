use persistence::Credentials;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database name; export files are named after it
    pub name: String,

    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.name, &self.user, &self.password)
            .with_host(&self.host)
            .with_port(self.port)
            .with_connect_timeout(self.connect_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Output layer of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `<database>.csv` / `<database>.json`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub csv: bool,

    #[serde(default)]
    pub json: bool,
}

impl ExportConfig {
    pub fn is_requested(&self) -> bool {
        self.csv || self.json
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            csv: false,
            json: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    persistence::db::default_host()
}
fn default_port() -> u16 {
    persistence::db::default_port()
}
fn default_connect_timeout() -> u64 {
    persistence::db::default_connect_timeout()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with CB__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CB").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Defaults are embedded so tests do not depend on the working directory.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [database]
            name = ""
            user = "postgres"
            password = ""
            host = "localhost"
            port = 5432
            connect_timeout_secs = 10

            [logging]
            level = "info"
            format = "json"

            [export]
            output_dir = "."
            csv = false
            json = false
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.name.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CB__DATABASE__NAME environment variable must be set".to_string(),
            ));
        }

        if self.database.user.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CB__DATABASE__USER environment variable must be set".to_string(),
            ));
        }

        if self.database.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Database port cannot be 0".to_string(),
            ));
        }

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::InvalidValue(
                "Export output_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config =
            Config::load_for_test(&[("database.name", "clients")]).expect("Failed to load config");

        assert_eq!(config.database.name, "clients");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.export.is_requested());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_env_override() {
        let config = Config::load_for_test(&[
            ("database.name", "clients"),
            ("database.port", "6543"),
            ("logging.level", "debug"),
            ("export.csv", "true"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.database.port, 6543);
        assert_eq!(config.logging.level, "debug");
        assert!(config.export.csv);
        assert!(!config.export.json);
        assert!(config.export.is_requested());
    }

    #[test]
    fn test_config_validation_missing_database_name() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("CB__DATABASE__NAME"));
    }

    #[test]
    fn test_config_validation_missing_user() {
        let config = Config::load_for_test(&[("database.name", "clients"), ("database.user", " ")])
            .expect("Failed to load config");
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("CB__DATABASE__USER"));
    }

    #[test]
    fn test_config_validation_zero_port() {
        let config = Config::load_for_test(&[("database.name", "clients"), ("database.port", "0")])
            .expect("Failed to load config");
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("port"));
    }

    #[test]
    fn test_credentials_from_config() {
        let config = Config::load_for_test(&[
            ("database.name", "clients"),
            ("database.user", "book"),
            ("database.password", "secret"),
            ("database.host", "db.internal"),
        ])
        .expect("Failed to load config");

        let credentials = config.database.credentials();
        assert_eq!(credentials.database, "clients");
        assert_eq!(credentials.user, "book");
        assert_eq!(credentials.password, "secret");
        assert_eq!(credentials.host, "db.internal");
        assert_eq!(credentials.port, 5432);
    }

    #[test]
    fn test_log_format_parsing() {
        let config = Config::load_for_test(&[("logging.format", "compact")])
            .expect("Failed to load config");
        assert_eq!(config.logging.format, LogFormat::Compact);

        let result = Config::load_for_test(&[("logging.format", "xml")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_defaults_to_pretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let config = Config::load_for_test(&[
            ("database.name", "clients"),
            ("database.password", "hunter2"),
        ])
        .expect("Failed to load config");

        let debug = format!("{:?}", config);
        assert!(debug.contains("clients"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_export_config_default() {
        let export = ExportConfig::default();
        assert_eq!(export.output_dir, PathBuf::from("."));
        assert!(!export.is_requested());
    }
}
