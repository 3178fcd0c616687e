//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: drives one accepted stream through
//!   `READING → PARSED → ROUTING → ENCODING → WRITING → CLOSED`
//! - [`ConnectionConfig`]: optional read/write deadlines and the body size limit
//!
//! Exactly one request is served per connection; the write side is shut down right
//! after the response has been flushed.

mod config;
mod http_connection;

pub use config::ConnectionConfig;
pub use http_connection::HttpConnection;
