use anyhow::Result;
use clap::Parser;
use ens_core::{EnsClient, LookupController};
use ens_lookup::{App, Config, UreqTransport};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout is the widget itself, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    tracing::debug!(endpoint = %config.endpoint, "starting");

    let controller = LookupController::new(EnsClient::new(&config.endpoint));
    let transport = UreqTransport::new(config.timeout());
    let mut app = App::new(controller, transport, config.date_style(), std::io::stdout());

    if config.names.is_empty() {
        app.run_interactive(BufReader::new(tokio::io::stdin())).await
    } else {
        app.run_once(&config.names).await
    }
}
