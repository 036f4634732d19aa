/// HTTP request methods.
///
/// The server only distinguishes GET. Every other leading token is kept
/// verbatim for logging and answered with 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// Anything that is not GET
    Other(String),
}

impl Method {
    /// Returns the method token as it appeared on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// # use minihttpd::http::request::Method;
    /// assert_eq!(Method::Get.as_str(), "GET");
    /// assert_eq!(Method::Other("POST".into()).as_str(), "POST");
    /// ```
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token,
        }
    }
}

/// A request line reduced to what routing needs.
///
/// `path` is empty when the method is not GET; no path is extracted for
/// unsupported methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request path exactly as sent (e.g., "/index.html")
    pub path: String,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
        }
    }

    pub fn unsupported(method: impl Into<String>) -> Self {
        Self {
            method: Method::Other(method.into()),
            path: String::new(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }
}
