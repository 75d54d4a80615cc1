use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wiki_hubot::{
    cmd::{RenderArgs, SendArgs, render, send},
    config::AppConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing `app.yaml`.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Formats an event and delivers it to the configured webhook.
    Send(SendArgs),
    /// Prints the message and payload for an event without sending it.
    Render(RenderArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(cli.config_dir.as_deref())?;
    config.validate()?;
    tracing::debug!(
        webhook_url = ?config.webhook_url.as_ref().map(|url| url.as_str()),
        room = %config.room_name,
        transport = ?config.transport,
        encoding = ?config.payload_encoding,
        "Configuration loaded."
    );
    if config.webhook_url.is_none() {
        tracing::warn!("webhook_url is not set; notifications will be dropped.");
    }

    match cli.command {
        Commands::Send(args) => send::execute(config, args).await?,
        Commands::Render(args) => render::execute(config, args)?,
    }

    Ok(())
}
