//! Process-wide configuration, parsed once at startup.

use std::net::SocketAddr;

use clap::Parser;

/// Local frontend dev servers allowed by CORS in debug builds.
const DEV_PORTS: [u16; 5] = [3000, 5173, 8000, 8080, 8081];

#[derive(Debug, Clone, Parser)]
#[command(name = "sessionq-backend", version, about = "Read-only query API over conference session metadata")]
pub struct Config {
    /// SQLite database holding the `sessions` table (path or `file:` URI)
    #[arg(long, env = "SESSIONQ_DATABASE")]
    pub database: String,

    /// Address to serve HTTP on
    #[arg(long, env = "SESSIONQ_LISTEN", default_value = "127.0.0.1:3030")]
    pub listen: SocketAddr,

    /// Additional origins allowed by CORS (comma separated)
    #[arg(
        long = "allow-origin",
        env = "SESSIONQ_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Refuse to start when the table has no `topic` column
    #[arg(long, env = "SESSIONQ_REQUIRE_TOPIC")]
    pub require_topic: bool,
}

impl Config {
    /// Every origin CORS should accept, dev origins included for debug builds.
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = Vec::new();
        if cfg!(debug_assertions) {
            for port in DEV_PORTS {
                origins.push(format!("http://localhost:{port}"));
                origins.push(format!("http://127.0.0.1:{port}"));
            }
        }
        origins.extend(
            self.allowed_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty()),
        );
        origins
    }
}
