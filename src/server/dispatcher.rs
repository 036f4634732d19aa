use std::future::Future;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};

use crate::server::pool::Submit;

/// Accept loop: hands every new connection to the pool and goes straight
/// back to accepting. Returns only on an accept or submit failure.
pub async fn run<P>(listener: &TcpListener, pool: &P) -> anyhow::Result<()>
where
    P: Submit<TcpStream>,
{
    loop {
        let (socket, peer) = listener.accept().await.context("Error on accept")?;
        debug!(%peer, "New socket");

        pool.submit(socket).context("Couldn't queue connection")?;
    }
}

/// Like [`run`], but stops accepting once `shutdown` resolves.
pub async fn run_until<P, F>(listener: &TcpListener, pool: &P, shutdown: F) -> anyhow::Result<()>
where
    P: Submit<TcpStream>,
    F: Future<Output = ()>,
{
    tokio::select! {
        res = run(listener, pool) => res,
        _ = shutdown => {
            info!("Shutdown signal received, no longer accepting");
            Ok(())
        }
    }
}
