mod cli;

use clap::Parser;
use cli::Cli;
use hlstail::{
    TailConfig,
    fetch::HttpFetcher,
    tail::Session,
    terminal::{Terminal, TerminalGuard, key_events},
};
use std::{path::Path, sync::Arc, sync::Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.into_config()?;
    let fetcher = HttpFetcher::new(config.timeout, config.headers.clone())?;

    tracing::info!("Starting hlstail for {}", config.url);

    // The terminal is restored by the time the error is printed.
    if let Err(e) = tail(config, fetcher).await {
        tracing::error!(code = e.error_code(), error = %e, "Session failed");
        return Err(e.into());
    }

    Ok(())
}

async fn tail(config: TailConfig, fetcher: HttpFetcher) -> hlstail::Result<()> {
    let _guard = TerminalGuard::enter()?;

    let mut session = Session::new(config, Arc::new(fetcher), Arc::new(Terminal::new()));
    let mut keys = key_events();
    session.run(&mut keys).await
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hlstail=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
