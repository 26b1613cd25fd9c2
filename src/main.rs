use anyhow::Result;
use dotenvy::dotenv;

use vidgate::cli::{Cli, Commands};
use vidgate::core::{config, init_logger, log_cookies_configuration};
use vidgate::extract::ytdlp;
use vidgate::server::run_server;

/// Main entry point for the gateway
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, server bind).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run { port, cookies }) => {
            if let Some(cookies_path) = cookies {
                // Must happen before any config static is read
                std::env::set_var("COOKIES_FILE", cookies_path);
            }
            run_gateway(port).await
        }
        Some(Commands::CheckYtdlp) => {
            let version = ytdlp::ytdlp_version().await?;
            println!("yt-dlp version: {}", version);
            Ok(())
        }
        None => run_gateway(None).await,
    }
}

async fn run_gateway(port: Option<u16>) -> Result<()> {
    init_logger(&config::LOG_FILE_PATH)?;
    log_cookies_configuration();

    match ytdlp::ytdlp_version().await {
        Ok(version) => log::info!("yt-dlp version: {}", version),
        Err(e) => log::warn!("yt-dlp check failed: {}. Extraction requests will not work until it is installed.", e),
    }

    let port = port.unwrap_or(*config::PORT);
    run_server(port).await.map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
