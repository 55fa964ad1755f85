use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Application configuration for todo-service.
///
/// Loaded once at startup and handed to the components that need it.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub run_mode: String,
}

/// PostgreSQL connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Externally reachable base URL, used to build password-reset links.
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl DatabaseConfig {
    /// Connection options for the configured database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl Config {
    /// Load configuration from defaults, files and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__HOST, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{run_mode}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    ///
    /// `RUN_MODE` selects the environment file and defaults to `debug`.
    /// There is no built-in signing secret: `jwt.secret` must come from a
    /// file or `JWT__SECRET`.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "debug".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432_i64)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "postgres")?
            .set_default("database.name", "todolist_db")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("server.http_port", 8080_i64)?
            .set_default("server.public_url", "http://localhost:8080")?
            .set_default("run_mode", run_mode.as_str())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__HOST=db overrides database.host
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }

    /// Whether the service runs in debug (development) mode.
    pub fn is_debug(&self) -> bool {
        self.run_mode.eq_ignore_ascii_case("debug")
    }

    /// Default tracing filter for the run mode, used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_debug() {
            "todo_service=debug,tower_http=debug"
        } else {
            "todo_service=info,tower_http=info"
        }
    }
}
