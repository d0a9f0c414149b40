/// Cadence - catalog browser and playback rehearsal
use anyhow::{Context, Result};
use cadence_catalog::CatalogClient;
use cadence_cli::{
    config::CliConfig,
    rehearsal::{rehearse, RehearsalOptions},
};
use cadence_core::{format_duration, CatalogEnvelope, PlaylistFilter, Tab, Track};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Browse the Cadence catalog and rehearse playback", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog as the player would show it
    Catalog {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Play through the playlist on a simulated device
    Rehearse {
        #[command(flatten)]
        filter: FilterArgs,

        /// Stop after this many tracks ended
        #[arg(long, default_value_t = 3)]
        tracks: usize,

        /// Length of tracks without a catalog duration, in seconds
        #[arg(long, default_value_t = 60.0)]
        track_secs: f64,

        /// Simulated seconds per step
        #[arg(long, default_value_t = 15.0)]
        tick_secs: f64,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Keep tracks whose title or artist contains this text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Category tab: for-you or top-tracks
    #[arg(short, long, default_value_t = Tab::ForYou)]
    tab: Tab,

    /// Read the catalog envelope from a JSON file instead of the API
    #[arg(long)]
    catalog_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Catalog { filter } => {
            list_catalog(&config, &filter).await?;
        }
        Commands::Rehearse {
            filter,
            tracks,
            track_secs,
            tick_secs,
        } => {
            let options = RehearsalOptions {
                tracks,
                track_secs,
                tick_secs,
            };
            run_rehearsal(&config, &filter, &options).await?;
        }
    }

    Ok(())
}

async fn list_catalog(config: &CliConfig, filter: &FilterArgs) -> Result<()> {
    let catalog = load_catalog(config, filter).await?;
    let playlist = PlaylistFilter::new(filter.search.clone(), filter.tab).apply(&catalog);

    tracing::info!(
        catalog = catalog.len(),
        shown = playlist.len(),
        tab = %filter.tab,
        "Catalog loaded"
    );

    for (index, track) in playlist.iter().enumerate() {
        println!(
            "{index:>3}  {} — {}  {}",
            track.title(),
            track.artist(),
            format_duration(track.duration())
        );
    }

    Ok(())
}

async fn run_rehearsal(
    config: &CliConfig,
    filter: &FilterArgs,
    options: &RehearsalOptions,
) -> Result<()> {
    let catalog = load_catalog(config, filter).await?;
    let playlist = PlaylistFilter::new(filter.search.clone(), filter.tab).apply(&catalog);

    let report = rehearse(playlist, config.playback.clone(), options)
        .context("Rehearsal could not start")?;

    println!(
        "selected {} tracks, {} ended, {} failed",
        report.selected.len(),
        report.ended.len(),
        report.failed.len()
    );
    for id in &report.ended {
        if let Some(track) = catalog.iter().find(|t| t.id() == id) {
            println!("  {} — {}", track.title(), track.artist());
        }
    }

    Ok(())
}

async fn load_catalog(config: &CliConfig, filter: &FilterArgs) -> Result<Vec<Track>> {
    if let Some(path) = &filter.catalog_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let envelope = CatalogEnvelope::from_json(&json)
            .with_context(|| format!("{} is not a catalog envelope", path.display()))?;
        return Ok(envelope.into_tracks(&config.catalog.asset_base_url));
    }

    let client = CatalogClient::new(config.catalog.clone()).context("Invalid catalog settings")?;
    client
        .fetch_tracks()
        .await
        .with_context(|| format!("Failed to fetch catalog from {}", client.api_url()))
}
