/// Marquee Player - headless playlist host
use clap::Parser;
use marquee_player::{catalog_file, PlayerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marquee-player")]
#[command(about = "Plays a Marquee playlist without a screen", long_about = None)]
struct Cli {
    /// Catalog JSON file
    #[arg(short = 'f', long)]
    catalog: PathBuf,

    /// Playlist to open
    #[arg(short, long)]
    playlist: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many item changes (0 = until interrupted)
    #[arg(short = 'n', long, default_value_t = 0)]
    cycles: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_player=info,marquee_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let catalog = catalog_file::load(&cli.catalog).await?;
    tracing::info!(
        "Catalog {} has {} media and {} playlists",
        cli.catalog.display(),
        catalog.media_count(),
        catalog.playlist_count()
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = marquee_player::run(
        &config,
        Arc::new(catalog),
        &cli.playlist,
        cli.cycles,
        shutdown,
    )
    .await?;

    tracing::info!("Visited {} items", summary.visited.len());
    Ok(())
}
