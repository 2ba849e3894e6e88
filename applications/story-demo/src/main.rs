/// Story Demo - run the story viewer core headless
use clap::Parser;
use std::path::PathBuf;
use story_demo::{config::DemoConfig, feed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "story-demo")]
#[command(about = "Drive a story viewing session from the command line", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STORY_CONFIG")]
    config: Option<PathBuf>,

    /// JSON feed of story bundles (built-in sample when omitted)
    #[arg(short, long)]
    bundles: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "story_demo=info,story_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = DemoConfig::load(cli.config.as_deref())?;
    if let Some(ticks) = cli.ticks {
        config.demo.max_ticks = Some(ticks);
    }

    let bundles = match &cli.bundles {
        Some(path) => feed::load_bundles(path)?,
        None => feed::sample_bundles(),
    };

    tracing::info!(
        bundles = bundles.len(),
        tick_ms = config.story.tick_interval_ms,
        cache = %config.cache.cache_dir.display(),
        "Starting story demo"
    );

    let report = story_demo::run(&config, bundles).await?;

    println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
    Ok(())
}
