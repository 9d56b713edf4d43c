use clap::Parser;
use restaurant_finder::config::{LoggingSettings, Settings};
use restaurant_finder::console::{ConsoleApp, ConsoleEvent};
use restaurant_finder::core::ChannelNotifier;
use restaurant_finder::services::SearchClient;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Find restaurants from the terminal
#[derive(Debug, Parser)]
#[command(name = "restaurant-finder", version, about)]
struct Args {
    /// Settings file (defaults to config/default.toml + config/local.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a search for this location on startup
    #[arg(long)]
    location: Option<String>,
}

fn init_logging(settings: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    init_logging(&settings.logging);

    info!("Starting restaurant finder against {}", settings.api.base_url);

    let client = Arc::new(SearchClient::from_settings(&settings.api)?);
    let (notifier, mut notices) = ChannelNotifier::channel();
    let (events_tx, mut events) = mpsc::unbounded_channel::<ConsoleEvent>();

    let mut app = ConsoleApp::new(&settings, client, notifier, events_tx);
    app.start();

    let quit_early = match &args.location {
        Some(location) => app.handle_line(&format!("search {}", location)).is_break(),
        None => false,
    };

    if !quit_early {
        let stdin = BufReader::new(tokio::io::stdin());
        app.run(stdin, &mut events, &mut notices).await?;
    }

    info!("Restaurant finder shutting down");

    Ok(())
}
