//! Server configuration.
//!
//! Every setting comes from a command-line flag with an environment
//! variable fallback.

use clap::Args;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Flags of `boundary serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "BOUNDARY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "BOUNDARY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Scope database file.
    #[arg(long, env = "BOUNDARY_DB", default_value = "boundary.redb")]
    pub db: PathBuf,

    /// Keep scope records in memory only (overrides --db).
    #[arg(long)]
    pub in_memory: bool,

    /// Global request limit per second; 0 disables limiting.
    #[arg(long, env = "BOUNDARY_RATE_LIMIT", default_value_t = 0)]
    pub rate_limit: u32,
}

/// Where scope records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    pub rate_limit: Option<NonZeroU32>,
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed bind address, if `host` is an IP literal.
    #[must_use]
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.bind_address().parse().ok()
    }
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        let store = if args.in_memory {
            StoreLocation::InMemory
        } else {
            StoreLocation::File(args.db)
        };
        Self {
            host: args.host,
            port: args.port,
            store,
            rate_limit: NonZeroU32::new(args.rate_limit),
        }
    }
}
