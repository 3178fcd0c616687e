use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tern_http::connection::{ConnectionConfig, HttpConnection};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::ServerConfig;
use crate::router::Router;
use crate::store::{DirStore, FileStore};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to read local address: {source}")]
    LocalAddr {
        #[from]
        source: io::Error,
    },
}

/// Accepts connections and serves each one on its own task.
///
/// Every task shares the same [`Router`], so the server holds no per-connection state.
#[derive(Debug)]
pub struct Server<S = DirStore> {
    listener: TcpListener,
    router: Arc<Router<S>>,
    connection: ConnectionConfig,
}

impl Server<DirStore> {
    /// Binds the configured address and serves files out of the configured directory.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let router = Router::new(DirStore::new(config.directory));
        Self::bind_with(config.address, router, config.connection).await
    }
}

impl<S: FileStore> Server<S> {
    pub async fn bind_with(address: SocketAddr, router: Router<S>, connection: ConnectionConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(address).await.map_err(|source| ServerError::Bind { address, source })?;
        Ok(Self { listener, router: Arc::new(router), connection })
    }

    /// The address actually bound, useful when listening on port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop forever.
    ///
    /// A failed `accept` is logged and skipped; it never stops the server.
    pub async fn serve(self) {
        match self.listener.local_addr() {
            Ok(address) => info!(%address, "start listening"),
            Err(e) => warn!(cause = %e, "start listening on unknown address"),
        }

        loop {
            let (tcp_stream, peer) = match self.listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let router = Arc::clone(&self.router);
            let config = self.connection;

            tokio::spawn(
                async move {
                    let (reader, writer) = tcp_stream.into_split();
                    let connection = HttpConnection::with_config(reader, writer, config);
                    if let Err(e) = connection.process(router).await {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
                .instrument(info_span!("connection", %peer)),
            );
        }
    }
}
