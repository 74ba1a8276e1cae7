use std::sync::Arc;

use clap::Parser;

use pedia_bot::article::WikipediaClient;
use pedia_bot::channels::lingr_routes;
use pedia_bot::config::BotConfig;
use pedia_bot::error::Error;
use pedia_bot::pipeline::LookupProcessor;

/// Chat webhook that answers `wp:<subject>` with an encyclopedia lead.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Server address (default: 0.0.0.0:$PORT, or 0.0.0.0:80)
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Arc::new(BotConfig::from_env().map_err(Error::from)?.with_addr(cli.addr));

    eprintln!("📖 pedia-bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listen: http://{}/lingr", config.addr);
    eprintln!("   Articles: {}", config.api_endpoint);
    eprintln!(
        "   Command: {}<subject> (timeout {}s, reply cap {} chars)\n",
        config.command_prefix,
        config.fetch_timeout.as_secs(),
        config.reply_char_limit
    );

    let source = Arc::new(WikipediaClient::from_config(&config)?);
    let processor = Arc::new(LookupProcessor::new(Arc::clone(&config), source).map_err(Error::from)?);
    let app = lingr_routes(processor);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", config.addr, e)))?;
    tracing::info!(addr = %config.addr, "Webhook server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    Ok(())
}
