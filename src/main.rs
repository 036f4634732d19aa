use minihttpd::config::{self, Config};
use minihttpd::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let port = match config::parse_args(std::env::args()) {
        Ok(port) => port,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(1);
        }
    };

    let cfg = Config::load(port)?;
    let server = Server::bind(cfg)?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Couldn't listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}
