use tracing::debug;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::static_files::StaticFileLoader;

/// Body of the built-in `/hello` route.
pub const HELLO_BODY: &str = "hello";

/// Exact-match routing: `/`, `/hello`, everything else from disk.
#[derive(Debug, Clone)]
pub struct Router {
    index_page: String,
    files: StaticFileLoader,
}

impl Router {
    pub fn new(index_page: impl Into<String>, files: StaticFileLoader) -> Self {
        Self {
            index_page: index_page.into(),
            files,
        }
    }

    pub async fn route(&self, req: &Request) -> Response {
        if !req.is_get() {
            debug!(method = req.method.as_str(), "unsupported method");
            return Response::not_found();
        }

        match req.path.as_str() {
            "/" => self.serve_file(&self.index_page).await,
            "/hello" => Response::ok(HELLO_BODY),
            path => self.serve_file(path).await,
        }
    }

    async fn serve_file(&self, path: &str) -> Response {
        match self.files.load(path).await {
            Ok(content) => Response::ok(content),
            Err(e) => {
                debug!(error = %e, "mapping load failure to 404");
                Response::not_found()
            }
        }
    }
}
