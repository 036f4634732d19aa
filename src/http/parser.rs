use crate::http::request::Request;

const GET_PREFIX: &str = "GET ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was received before the peer closed.
    Empty,
    /// `GET ` with no space after the path on the request line.
    MissingPathDelimiter,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request"),
            ParseError::MissingPathDelimiter => {
                write!(f, "malformed request line: no delimiter after path")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses the first line of a raw request.
///
/// Only the request line is looked at; headers and anything after them are
/// ignored. A request that does not start with `GET ` parses successfully as
/// an unsupported method.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let line = first_line(buf);

    let Some(rest) = line.strip_prefix(GET_PREFIX.as_bytes()) else {
        return Ok(Request::unsupported(method_token(line)));
    };

    let end = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MissingPathDelimiter)?;

    Ok(Request::get(String::from_utf8_lossy(&rest[..end])))
}

/// Returns the request line without its `\n` or `\r\n` terminator.
fn first_line(buf: &[u8]) -> &[u8] {
    let line = match buf.iter().position(|&b| b == b'\n') {
        Some(pos) => &buf[..pos],
        None => buf,
    };
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn method_token(line: &[u8]) -> String {
    let end = line
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(line.len());
    String::from_utf8_lossy(&line[..end]).into_owned()
}

/// Position just past the end of the header block, if the buffer holds one.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|p| p + 4);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|p| p + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
