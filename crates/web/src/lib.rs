//! Routes, file storage and the connection acceptor of the tern server.
//!
//! ```no_run
//! use tern_web::{Server, ServerConfig};
//!
//! # async fn run() -> Result<(), tern_web::ServerError> {
//! let server = Server::bind(ServerConfig::default()).await?;
//! server.serve().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod router;
pub mod server;
pub mod store;

pub use config::{Cli, ServerConfig};
pub use router::{RouteError, Router};
pub use server::{Server, ServerError};
pub use store::{DirStore, FileStore, StoreError};
