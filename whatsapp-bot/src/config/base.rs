//! Base config: HTTP listener, logging, thread database. Loaded from env.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Base config: server bind address, logging and the contact → thread database only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// Log file path
    pub log_file: String,
    /// SQLite file holding the contact → thread mapping
    pub database_url: String,
}

impl BaseConfig {
    /// Load from environment variables. `port` overrides PORT if provided.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match port {
            Some(p) => p,
            None => match env::var("PORT") {
                Ok(s) => s
                    .parse()
                    .with_context(|| format!("PORT is not a valid port number: {}", s))?,
                Err(_) => 8000,
            },
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "./data/threads.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/whatsapp-bot.log".to_string());

        Ok(Self {
            host,
            port,
            log_file,
            database_url,
        })
    }

    /// `host:port` as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("HOST/PORT is not a valid bind address: {}:{}", self.host, self.port))
    }

    /// Validate config (bind address must parse, database path must be set).
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL is empty");
        }
        Ok(())
    }
}
