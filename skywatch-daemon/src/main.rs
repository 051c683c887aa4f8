//! skywatch: ADS-B feed polling daemon with Telegram squawk/watchlist alerts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use skywatch_core::engine::{AlertEngine, EngineConfig};
use skywatch_core::format::{self, Enrichment};
use skywatch_core::types::Result;
use skywatch_core::watchlist::WatchlistIndex;

mod enrich;
mod feed;
mod notify;
mod update;

#[derive(Parser)]
#[command(name = "skywatch", version, about = "ADS-B squawk and watchlist alerting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the aircraft feed and send alerts
    Run(RunArgs),

    /// Refresh plane-alert-db list CSVs and rebuild the watchlist
    UpdateLists(UpdateListsArgs),

    /// Refresh plane-alert-db image CSVs
    UpdateImages(UpdateImagesArgs),
}

fn default_image_files() -> Vec<String> {
    vec![
        "plane-alert-civ-images.csv".to_string(),
        "plane-alert-mil-images.csv".to_string(),
        "plane-alert-gov-images.csv".to_string(),
    ]
}

#[derive(Args)]
struct RunArgs {
    /// Aircraft feed endpoint (aircraft.json)
    #[arg(long, env = "AIRCRAFT_JSON_URI")]
    feed_url: String,

    /// Watchlist file path
    #[arg(long, env = "WATCHLIST_FILE", default_value = "watchlist.txt")]
    watchlist: PathBuf,

    /// Enrichment CSV files, comma separated
    #[arg(long, env = "IMAGE_FILES", value_delimiter = ',',
          default_values_t = default_image_files())]
    image_files: Vec<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    bot_token: String,

    /// Telegram chat id
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    chat_id: String,

    /// Gate watchlist alerts on altitude
    #[arg(long, env = "ALTITUDE_FILTER")]
    altitude_filter: bool,

    /// Altitude ceiling in feet
    #[arg(long, env = "AIRCRAFT_CEILING", default_value_t = 10_000)]
    ceiling: i32,

    /// Gate watchlist alerts on distance from home
    #[arg(long, env = "DISTANCE_FILTER")]
    distance_filter: bool,

    /// Alert radius in statute miles
    #[arg(long, env = "ALERT_RADIUS", default_value_t = 50.0)]
    radius: f64,

    /// Home latitude
    #[arg(long, env = "HOME_LAT", default_value_t = 0.0, allow_hyphen_values = true)]
    home_lat: f64,

    /// Home longitude
    #[arg(long, env = "HOME_LON", default_value_t = 0.0, allow_hyphen_values = true)]
    home_lon: f64,

    /// Seconds between repeat alerts per aircraft and kind
    #[arg(long, env = "COOLDOWN_SECS", default_value_t = 3600.0)]
    cooldown: f64,

    /// Seconds between feed polls
    #[arg(long, env = "SCRIPT_INTERVAL", default_value_t = 60)]
    interval: u64,
}

#[derive(Args)]
struct UpdateListsArgs {
    /// List CSV filenames to download, comma separated
    #[arg(long, env = "LIST_FILES", value_delimiter = ',', required = true)]
    files: Vec<String>,

    /// Watchlist file to regenerate
    #[arg(long, env = "WATCHLIST_FILE", default_value = "watchlist.txt")]
    watchlist: PathBuf,

    /// Source URL base
    #[arg(long, default_value = update::PLANE_ALERT_DB_URL)]
    url_base: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

#[derive(Args)]
struct UpdateImagesArgs {
    /// Image CSV filenames to download, comma separated
    #[arg(long, env = "IMAGE_FILES", value_delimiter = ',',
          default_values_t = default_image_files())]
    files: Vec<String>,

    /// Source URL base
    #[arg(long, default_value = update::PLANE_ALERT_DB_URL)]
    url_base: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => cmd_run(args).await,
        Commands::UpdateLists(args) => {
            update::update_lists(&args.url_base, &args.files, &args.watchlist, args.yes).await
        }
        Commands::UpdateImages(args) => {
            update::update_images(&args.url_base, &args.files, args.yes).await
        }
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn cmd_run(args: RunArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.watchlist)?;
    let watchlist = WatchlistIndex::parse(&text);
    info!(
        "loaded {} watchlist entries from {}",
        watchlist.len(),
        args.watchlist.display()
    );

    let enrichment = enrich::load_enrichment(&args.image_files);
    info!("loaded {} enrichment rows", enrichment.len());

    let config = EngineConfig {
        altitude_filter: args.altitude_filter,
        ceiling_ft: args.ceiling,
        distance_filter: args.distance_filter,
        radius_mi: args.radius,
        home_lat: args.home_lat,
        home_lon: args.home_lon,
        cooldown_secs: args.cooldown,
    };
    let mut engine = AlertEngine::new(&config, watchlist);
    let feed = feed::FeedClient::new(&args.feed_url);
    let notifier = notify::TelegramNotifier::new(&args.bot_token, &args.chat_id);

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            _ = ticker.tick() => {
                poll_cycle(&mut engine, &feed, &notifier, &enrichment).await;
            }
        }
    }
    Ok(())
}

/// One poll cycle: fetch, evaluate, deliver. Feed and delivery failures are
/// logged and never abort the loop.
async fn poll_cycle(
    engine: &mut AlertEngine,
    feed: &feed::FeedClient,
    notifier: &notify::TelegramNotifier,
    enrichment: &HashMap<String, Enrichment>,
) {
    let records = match feed.fetch().await {
        Ok(r) => r,
        Err(e) => {
            warn!("feed fetch failed: {e}");
            return;
        }
    };

    let now = epoch_secs();
    let events = engine.evaluate(&records, now);
    debug!("cycle: {} aircraft, {} alerts", records.len(), events.len());

    for event in events {
        let text = format::render(&event, enrichment.get(&event.record.hex));
        match notifier.send(&text).await {
            Ok(()) => info!("{} alert sent for {}", event.kind(), event.record.hex),
            Err(e) => warn!(
                "failed to send {} alert for {}: {e}",
                event.kind(),
                event.record.hex
            ),
        }
    }
}

fn epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
