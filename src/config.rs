use std::net::SocketAddr;
use std::time::Duration;

use envconfig::Envconfig;

/// Process configuration, read from the environment (and `.env` when present).
#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    /// Full connection string. When set, the `DB_*` parts are ignored.
    #[envconfig(from = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[envconfig(from = "DB_HOST", default = "localhost")]
    pub db_host: String,

    #[envconfig(from = "DB_PORT", default = "5432")]
    pub db_port: u16,

    #[envconfig(from = "DB_USER", default = "postgres")]
    pub db_user: String,

    #[envconfig(from = "DB_PASSWORD", default = "")]
    pub db_password: String,

    #[envconfig(from = "DB_NAME", default = "medicine_reminder")]
    pub db_name: String,

    #[envconfig(from = "DB_SSLMODE", default = "disable")]
    pub db_sslmode: String,

    #[envconfig(from = "DB_MAX_CONNECTIONS", default = "10")]
    pub db_max_connections: u32,

    #[envconfig(from = "DB_ACQUIRE_TIMEOUT_SECS", default = "5")]
    pub db_acquire_timeout_secs: u64,

    #[envconfig(from = "BIND_ADDR", default = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    #[envconfig(from = "REQUEST_TIMEOUT_SECS", default = "30")]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Connection string for the store, either `DATABASE_URL` verbatim or one
    /// assembled from the `DB_*` parts.
    pub fn connection_string(&self) -> String {
        match &self.database_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => build_connection_string(
                &self.db_user,
                &self.db_password,
                &self.db_host,
                self.db_port,
                &self.db_name,
                &self.db_sslmode,
            ),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds a PostgreSQL URL. Only the password is escaped, the other parts are
/// expected to be URL-safe already.
pub fn build_connection_string(
    user: &str,
    password: &str,
    host: &str,
    port: u16,
    db_name: &str,
    sslmode: &str,
) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        user,
        urlencoding::encode(password),
        host,
        port,
        db_name,
        sslmode
    )
}
