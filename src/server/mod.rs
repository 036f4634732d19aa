//! Socket side of the server.
//!
//! - **`listener`**: binds the listening socket, probing upward for a free port
//! - **`pool`**: fixed-size worker pool fed through a work queue
//! - **`dispatcher`**: accept loop feeding connections to the pool
//!
//! [`Server`] wires them to the HTTP layer.

pub mod dispatcher;
pub mod listener;
pub mod pool;

use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpStream;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::router::Router;
use crate::server::listener::{BoundListener, bind_with_probe};
use crate::server::pool::WorkerPool;
use crate::static_files::StaticFileLoader;

pub struct Server {
    config: Config,
    bound: BoundListener,
}

impl Server {
    /// Binds the listening socket. The server does not accept anything until
    /// [`run`](Self::run) or [`run_until`](Self::run_until) is called, but
    /// the OS backlog already queues incoming connections.
    pub fn bind(config: Config) -> anyhow::Result<Self> {
        let host: IpAddr = config
            .host
            .parse()
            .with_context(|| format!("invalid host address: {}", config.host))?;
        let bound = bind_with_probe(host, config.port, config.backlog)?;
        Ok(Self { config, bound })
    }

    /// The port the listener actually bound to.
    pub fn port(&self) -> u16 {
        self.bound.port()
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` resolves or accepting fails, then drains the
    /// worker pool for at most the configured grace period.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let files = StaticFileLoader::new(self.config.document_root.clone());
        let router = Arc::new(Router::new(self.config.index_page.clone(), files));

        let pool = WorkerPool::start(self.config.workers, move |worker, stream: TcpStream| {
            let router = Arc::clone(&router);
            async move {
                if let Err(e) = Connection::new(stream, router).run().await {
                    error!(worker, "Connection error: {:#}", e);
                }
            }
        })?;
        info!(
            workers = pool.size(),
            address = %self.config.address(self.port()),
            "Accepting connections"
        );

        let result = dispatcher::run_until(self.bound.listener(), &pool, shutdown).await;

        pool.shutdown(self.config.shutdown_grace()).await;
        info!("Server stopped");
        result
    }
}
