use std::error::Error;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use http::StatusCode;
use http::header::ACCEPT_ENCODING;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, error, info, warn};

use crate::codec::{ContentCoding, RequestDecoder, ResponseEncoder};
use crate::connection::ConnectionConfig;
use crate::handler::Handler;
use crate::protocol::{HttpError, Request, Response, SendError};

/// An HTTP connection that serves exactly one request
///
/// `HttpConnection` drives one accepted stream through its whole lifecycle:
/// reading and decoding the request, calling the handler, negotiating the content
/// coding, writing the encoded response and shutting the stream down.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    config: ConnectionConfig,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, ConnectionConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: ConnectionConfig) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::with_max_body_bytes(config.max_body_bytes), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            config,
        }
    }

    /// Reads one request, answers it and closes the write side.
    ///
    /// A peer that disconnects before sending anything ends the connection with `Ok(())`.
    /// A request that fails to parse is answered with a best-effort error response and
    /// the parse error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request is malformed, a deadline elapses or the
    /// response can't be written.
    pub async fn process<H: Handler>(mut self, handler: Arc<H>) -> Result<(), HttpError> {
        let request = match self.read_request().await {
            Ok(Some(request)) => request,
            Ok(None) => {
                info!("cant read more request, break this connection down");
                return Ok(());
            }
            Err(HttpError::RequestError { source }) => {
                error!("can't receive next request, cause {}", source);
                let error_response = Response::new(source.status_code());
                if let Err(e) = self.send_response(error_response, None).await {
                    warn!(cause = %e, "failed to send error response");
                }
                return Err(source.into());
            }
            Err(e) => return Err(e),
        };

        debug!(method = %request.method(), path = request.path(), "received request");

        let coding = ContentCoding::negotiate(request.headers().get(ACCEPT_ENCODING));
        let version = request.version();

        let response = match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!("handle response error, cause: {}", e);
                Response::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        self.send_response(response.with_version(version), coding).await
    }

    async fn read_request(&mut self) -> Result<Option<Request>, HttpError> {
        let next = self.framed_read.next();
        let item = with_deadline(self.config.read_timeout, "read request", next).await?;
        Ok(item.transpose()?)
    }

    async fn send_response(&mut self, response: Response, coding: Option<ContentCoding>) -> Result<(), HttpError> {
        let status = response.status();
        let write_timeout = self.config.write_timeout;

        // encoding happens fully in memory before anything reaches the socket
        let send = async {
            self.framed_write.send((response, coding)).await?;
            self.framed_write.get_mut().shutdown().await.map_err(SendError::io)
        };
        with_deadline(write_timeout, "write response", send).await??;

        info!(status = status.as_u16(), "finished process, connection shutdown");
        Ok(())
    }
}

async fn with_deadline<F: Future>(deadline: Option<Duration>, phase: &'static str, future: F) -> Result<F::Output, HttpError> {
    match deadline {
        Some(after) => tokio::time::timeout(after, future).await.map_err(|_elapsed| HttpError::timeout(phase, after)),
        None => Ok(future.await),
    }
}
