//! Server configuration and the command line that fills it.
//!
//! Every flag can also come from a `TERN_*` environment variable:
//!
//! ```bash
//! tern --directory /tmp/files --address 0.0.0.0:4221
//! TERN_DIRECTORY=/tmp/files TERN_LOG_LEVEL=debug tern
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tern_http::codec::DEFAULT_MAX_BODY_BYTES;
use tern_http::connection::ConnectionConfig;
use tracing::Level;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:4221";

#[derive(Debug, Clone, Parser)]
#[command(name = "tern", version, about = "a small HTTP/1.1 server for echo, user-agent and file routes")]
pub struct Cli {
    /// Directory served by the `/files` routes
    #[arg(long, default_value = ".", env = "TERN_DIRECTORY")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_ADDRESS, env = "TERN_ADDRESS")]
    pub address: SocketAddr,

    /// Deadline for receiving a complete request, in milliseconds
    #[arg(long = "read-timeout-ms", env = "TERN_READ_TIMEOUT_MS")]
    pub read_timeout_ms: Option<u64>,

    /// Deadline for writing the response, in milliseconds
    #[arg(long = "write-timeout-ms", env = "TERN_WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: Option<u64>,

    /// Largest accepted request body
    #[arg(long = "max-body-bytes", default_value_t = DEFAULT_MAX_BODY_BYTES, env = "TERN_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Maximum level of emitted log events
    #[arg(long = "log-level", default_value = "info", env = "TERN_LOG_LEVEL")]
    pub log_level: Level,
}

/// Everything [`Server::bind`](crate::Server::bind) needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub directory: PathBuf,
    pub connection: ConnectionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 4221)),
            directory: PathBuf::from("."),
            connection: ConnectionConfig::default(),
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            address: cli.address,
            directory: cli.directory,
            connection: ConnectionConfig {
                read_timeout: cli.read_timeout_ms.map(Duration::from_millis),
                write_timeout: cli.write_timeout_ms.map(Duration::from_millis),
                max_body_bytes: cli.max_body_bytes,
            },
        }
    }
}
