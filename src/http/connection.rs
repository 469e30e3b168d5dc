use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::config::ServerConfig;
use crate::http::framer::Framer;
use crate::http::parser::FrameError;
use crate::http::request::Request;
use crate::http::writer::{write_raw_bad_request, ResponseWriter};
use crate::pot::BrewHandler;

pub struct Connection<S> {
    stream: S,
    framer: Framer,
    handler: Arc<BrewHandler>,
    read_buffer_size: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Rejecting(FrameError),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<BrewHandler>, server: &ServerConfig) -> Self {
        Self {
            stream,
            framer: Framer::with_limits(server.max_header_bytes, server.max_body_bytes),
            handler,
            read_buffer_size: server.read_buffer_size,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Ok(Some(req)) => ConnectionState::Dispatching(req),
                        Ok(None) => ConnectionState::Closed,
                        Err(e) => ConnectionState::Rejecting(e),
                    };
                }

                ConnectionState::Dispatching(req) => {
                    let writer = ResponseWriter::new(&mut self.stream);
                    self.handler.handle(&req, writer).await?;

                    // One response per connection: the write side is shut now.
                    if self.framer.buffered() > 0 {
                        tracing::debug!(
                            discarded = self.framer.buffered(),
                            "Dropping pipelined bytes after close"
                        );
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Rejecting(err) => {
                    tracing::warn!(error = %err, "Rejecting malformed request");
                    write_raw_bad_request(&mut self.stream, &err.to_string()).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until the framer yields a request, a framing error, or the peer
    /// closes (`Ok(Ok(None))`).
    pub async fn read_request(&mut self) -> std::io::Result<Result<Option<Request>, FrameError>> {
        let mut temp = vec![0u8; self.read_buffer_size];

        loop {
            match self.framer.next_request() {
                Ok(Some(request)) => return Ok(Ok(Some(request))),
                Ok(None) => {}
                Err(e) => return Ok(Err(e)),
            }

            let n = self.stream.read(&mut temp).await?;
            if n == 0 {
                if self.framer.buffered() > 0 {
                    tracing::debug!(
                        buffered = self.framer.buffered(),
                        "Peer closed mid-request"
                    );
                }
                return Ok(Ok(None));
            }

            self.framer.append(&temp[..n]);
        }
    }
}
