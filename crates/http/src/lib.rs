//! The HTTP/1.1 protocol core of the tern server
//!
//! This crate turns a byte stream into a [`protocol::Request`], hands it to a
//! [`handler::Handler`], and serializes the returned [`protocol::Response`] with an
//! optional gzip content coding. It is built on tokio and `tokio-util` codecs.
//!
//! # Example
//!
//! ```no_run
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use tern_http::connection::HttpConnection;
//! use tern_http::handler::make_handler;
//! use tern_http::protocol::{Request, Response};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Infallible> {
//!     info!(path = request.path(), "request path");
//!     Ok(Response::ok().with_body("Hello World!\r\n"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: [`protocol::Headers`], requests, responses and error types
//! - [`codec`]: the request decoder, the response encoder and content negotiation
//! - [`connection`]: the one-request-per-connection lifecycle
//! - [`handler`]: the request handler trait
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only, no TLS
//! - One request per connection, no keep-alive
//! - No chunked transfer-encoding: bodies are framed by `content-length`
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
