use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_gateway::{config::Config, web::WebServer};

#[derive(Parser)]
#[command(name = "iptv-gateway")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight IPTV playlist and EPG aggregation service")]
#[command(long_about = None)]
struct Cli {
    /// Channels file path
    #[arg(short, long, default_value = "channels.json")]
    channels: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port (overrides the PORT environment variable)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("iptv_gateway={},tower_http=trace", cli.log_level)
    } else {
        format!("iptv_gateway={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IPTV Gateway v{}", env!("CARGO_PKG_VERSION"));

    // Environment-derived configuration, constructed once and passed down.
    let mut config = Config::from_env();

    // Override config with CLI arguments
    config.channels_file = cli.channels.into();
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    info!("Using channels file: {}", config.channels_file.display());
    if let Some(proxy_base) = &config.proxy.base_url {
        info!("Rewriting stream URLs through proxy: {}", proxy_base);
    }

    let web_server = WebServer::new(config)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
