//! Server configuration.
//!
//! Values come from built-in defaults, an optional `minihttpd.yaml` in the
//! working directory, and finally the port given on the command line.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "minihttpd.yaml";

/// Resource served for `GET /`.
pub const DEFAULT_INDEX_PAGE: &str = "/static/index.html";

pub const DEFAULT_WORKERS: usize = 4;

/// Linux `SOMAXCONN`; the kernel clamps it to `net.core.somaxconn` anyway.
pub const DEFAULT_BACKLOG: u32 = 4096;

/// How long shutdown waits for in-flight connections before aborting them.
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 5_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    /// First port tried by the listener.
    pub port: u16,
    pub workers: usize,
    pub backlog: u32,
    pub index_page: String,
    /// Root for static files. `None` means the process working directory,
    /// looked up again for every request.
    pub document_root: Option<PathBuf>,
    pub shutdown_grace_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: DEFAULT_WORKERS,
            backlog: DEFAULT_BACKLOG,
            index_page: DEFAULT_INDEX_PAGE.to_string(),
            document_root: None,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl Config {
    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(s).context("invalid configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn from_file_or_default(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                Self::from_yaml_str(&text).with_context(|| format!("reading {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Builds the startup configuration: optional config file in the
    /// working directory, then the command-line port on top.
    pub fn load(port: u16) -> anyhow::Result<Self> {
        let mut cfg = Self::from_file_or_default(Path::new(CONFIG_FILE))?;
        cfg.port = port;
        Ok(cfg)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.document_root = Some(root.into());
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace_ms = grace.as_millis() as u64;
        self
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    pub fn address(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if !self.index_page.starts_with('/') {
            anyhow::bail!("index_page must start with '/': {}", self.index_page);
        }
        Ok(())
    }
}

/// Parses the command line: exactly one positional argument, the port.
///
/// Returns the usage line as the error so `main` can print it verbatim.
pub fn parse_args<I>(args: I) -> Result<u16, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "minihttpd".to_string());
    let usage = format!("usage: {} [port]", program);

    match (args.next(), args.next()) {
        (Some(port), None) => port.parse().map_err(|_| usage),
        _ => Err(usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_only_given_keys() {
        let cfg = Config::from_yaml_str("workers: 8\nindex_page: /index.html\n").unwrap();
        assert_eq!(cfg.workers, 8);
        assert_eq!(cfg.index_page, "/index.html");
        assert_eq!(cfg.backlog, DEFAULT_BACKLOG);
        assert!(cfg.document_root.is_none());
        assert_eq!(cfg.shutdown_grace(), Duration::from_millis(DEFAULT_SHUTDOWN_GRACE_MS));
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(Config::from_yaml_str("workers: 0\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("minihttpd-definitely-missing.yaml");
        let cfg = Config::from_file_or_default(&path).unwrap();
        assert_eq!(cfg.workers, DEFAULT_WORKERS);
        assert_eq!(cfg.index_page, DEFAULT_INDEX_PAGE);
    }
}
