use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::static_files::buffer::GrowableBuffer;

#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened.
    NotFound(String),
    /// The path could resolve outside the document root.
    Forbidden(String),
    /// The working directory could not be determined.
    NoDocumentRoot(std::io::Error),
    /// The file was opened but reading it failed.
    Read(std::io::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "resource not found: {}", path),
            LoadError::Forbidden(path) => write!(f, "path escapes document root: {}", path),
            LoadError::NoDocumentRoot(e) => write!(f, "couldn't read current directory: {}", e),
            LoadError::Read(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Loads files named by request paths from a document root.
#[derive(Debug, Clone, Default)]
pub struct StaticFileLoader {
    root: Option<PathBuf>,
}

impl StaticFileLoader {
    /// `None` serves from the process working directory, queried on every
    /// load.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Root and request path joined by plain concatenation: `/a.html` under
    /// `/srv` is `/srv/a.html`.
    pub fn resolve(root: &Path, path: &str) -> PathBuf {
        let mut full = root.as_os_str().to_os_string();
        full.push(path);
        PathBuf::from(full)
    }

    pub async fn load(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        if escapes_root(path) {
            warn!(path, "rejected path outside document root");
            return Err(LoadError::Forbidden(path.to_string()));
        }

        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(LoadError::NoDocumentRoot)?,
        };
        let full = Self::resolve(&root, path);

        let file = match File::open(&full).await {
            Ok(file) => file,
            Err(_) => {
                warn!("resource not found: {}", path);
                return Err(LoadError::NotFound(path.to_string()));
            }
        };

        let content = read_all(BufReader::new(file))
            .await
            .map_err(LoadError::Read)?;
        debug!(path, bytes = content.len(), "loaded static file");

        Ok(content)
    }
}

/// Reads a stream to its end one byte at a time into a [`GrowableBuffer`].
pub async fn read_all<R>(mut reader: R) -> std::io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = GrowableBuffer::new();

    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            break;
        }
        let n = chunk.len();
        for &byte in chunk {
            buf.push(byte);
        }
        reader.consume(n);
    }

    Ok(buf.into_vec())
}

/// True for paths that could resolve outside the root once concatenated:
/// anything not starting with `/` (it would extend the root's last
/// component, e.g. `/srv/www` + `-old/x`) and anything with a `..` segment.
fn escapes_root(path: &str) -> bool {
    !path.starts_with('/') || path.split(['/', '\\']).any(|segment| segment == "..")
}
