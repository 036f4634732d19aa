/// Body sent with every 404.
pub const NOT_FOUND_BODY: &str = "<html><body> <h1>Not found</h1></body></html>";

/// Body sent when the request line cannot be parsed.
pub const BAD_REQUEST_BODY: &str = "<html><body> <h1>Bad request</h1></body></html>";

/// Every response is declared as HTML.
pub const CONTENT_TYPE: &str = "text/html";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): Route matched or file loaded
/// - `BadRequest` (400): Malformed GET request line
/// - `NotFound` (404): Missing file or unsupported method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use minihttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A complete response ready to be written to a client.
///
/// There is no header map: the content type is fixed and the content length
/// is always computed from `body` when the response is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    /// Creates the fixed 404 Not Found response.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, NOT_FOUND_BODY)
    }

    /// Creates the fixed 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest, BAD_REQUEST_BODY)
    }

    /// Value of the `Content-Length` header: the exact body size.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}
