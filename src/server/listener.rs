use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, info};

/// The listening socket together with the port it ended up on.
#[derive(Debug)]
pub struct BoundListener {
    port: u16,
    listener: TcpListener,
}

impl BoundListener {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn listener(&self) -> &TcpListener {
        &self.listener
    }
}

/// Binds `host:start_port`, moving up one port at a time while the bind
/// fails, then listens.
///
/// Address reuse is enabled so a restart does not trip over a port still in
/// `TIME_WAIT`. Failing to create the socket, set the option or listen is an
/// error; a busy port is not.
pub fn bind_with_probe(host: IpAddr, start_port: u16, backlog: u32) -> anyhow::Result<BoundListener> {
    let socket = match host {
        IpAddr::V4(_) => TcpSocket::new_v4(),
        IpAddr::V6(_) => TcpSocket::new_v6(),
    }
    .context("ERROR opening socket")?;

    socket
        .set_reuseaddr(true)
        .context("ERROR setting socket options")?;

    let mut port = start_port;
    loop {
        match socket.bind(SocketAddr::new(host, port)) {
            Ok(()) => break,
            Err(e) => {
                debug!(port, error = %e, "bind failed, trying next port");
                port = port
                    .checked_add(1)
                    .with_context(|| format!("no free port at or above {}", start_port))?;
            }
        }
    }

    let listener = socket.listen(backlog).context("Couldn't listen")?;
    let port = listener.local_addr().context("Couldn't read bound address")?.port();
    info!(port, "Running on port: {}", port);

    Ok(BoundListener { port, listener })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn ephemeral_port_is_reported() {
        let bound = bind_with_probe(IpAddr::V4(Ipv4Addr::LOCALHOST), 0, 16).unwrap();
        assert_ne!(bound.port(), 0);
        assert_eq!(bound.listener().local_addr().unwrap().port(), bound.port());
    }
}
