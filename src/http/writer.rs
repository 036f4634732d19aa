use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{CONTENT_TYPE, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response: status line, content type, content length, blank
/// line, body. Every line, the body included, ends with CRLF; the trailing
/// CRLF after the body is not counted in `Content-Length`.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(resp.body.len() + 96);

    write_line(
        &mut buf,
        format!(
            "{} {} {}",
            HTTP_VERSION,
            resp.status.as_u16(),
            resp.status.reason_phrase()
        )
        .as_bytes(),
    );
    write_line(&mut buf, format!("Content-Type: {}", CONTENT_TYPE).as_bytes());
    write_line(
        &mut buf,
        format!("Content-Length: {}", resp.content_length()).as_bytes(),
    );
    write_line(&mut buf, b"");
    write_line(&mut buf, &resp.body);

    buf
}

fn write_line(buf: &mut Vec<u8>, line: &[u8]) {
    buf.extend_from_slice(line);
    buf.extend_from_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.written
    }

    /// Writes the whole response, retrying short writes.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.remaining() > 0 {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
