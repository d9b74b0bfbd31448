use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} n'est pas un nombre valide : {value}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub backend_url: String,
    /// PostgreSQL URL. Without one the server keeps Pokemon in memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Config {
    /// Reads the process environment (call `dotenvy::dotenv()` first for `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.into());
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            backend_url,
            database_url,
            max_connections,
        })
    }
}
