use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("WAYPOINT_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("WAYPOINT_PORT is not a valid port: '{}'", raw))?,
            None => 5000,
        };

        Ok(Self {
            host: lookup("WAYPOINT_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: lookup("WAYPOINT_DB_PATH").unwrap_or_else(|| "waypoint.db".into()).into(),
            static_dir: lookup("WAYPOINT_STATIC_DIR")
                .unwrap_or_else(|| "crates/waypoint-server/static".into())
                .into(),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
