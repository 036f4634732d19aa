use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::http::parser::{ParseError, find_headers_end, parse_request_line};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Router;
use crate::http::writer::ResponseWriter;

/// Upper bound on what is read before parsing. Only the request line
/// matters, so anything beyond this is never looked at.
pub const MAX_REQUEST_SIZE: usize = 16 * 1024;

const READ_CHUNK: usize = 1024;

/// One accepted client, owned by a single worker until it is closed.
pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
}

pub enum ConnectionState {
    Reading,
    Parsing,
    Routing(Request),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            router,
        }
    }

    /// Drives the connection to `Closed`. The stream is shut down and
    /// dropped whether this returns `Ok` or `Err`.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        let _ = self.stream.shutdown().await;
        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.read_request().await?;
                    self.state = ConnectionState::Parsing;
                }

                ConnectionState::Parsing => {
                    self.state = match parse_request_line(&self.buffer) {
                        Ok(req) => ConnectionState::Routing(req),
                        Err(ParseError::Empty) => {
                            debug!("peer closed without sending a request");
                            ConnectionState::Closed
                        }
                        Err(e) => {
                            debug!(error = %e, "rejecting request");
                            Self::respond(Response::bad_request())
                        }
                    };
                }

                ConnectionState::Routing(req) => {
                    let response = self.router.route(req).await;
                    info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        status = response.status.as_u16(),
                        "request handled"
                    );
                    self.state = Self::respond(response);
                }

                ConnectionState::Responding(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    fn respond(response: Response) -> ConnectionState {
        ConnectionState::Responding(ResponseWriter::new(&response))
    }

    /// Reads until the header block is complete, the peer stops sending, or
    /// the size cap is reached.
    pub async fn read_request(&mut self) -> anyhow::Result<()> {
        loop {
            if find_headers_end(&self.buffer).is_some() || self.buffer.len() >= MAX_REQUEST_SIZE {
                return Ok(());
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return Ok(());
            }
        }
    }
}
