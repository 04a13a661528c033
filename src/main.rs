use clap::Parser;
use gamerec::session;
use gamerec::{LoadSource, StorageManager, StoreConfig, DEFAULT_TOP_K};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend games similar to the ones you like
#[derive(Parser, Debug)]
#[command(name = "gamerec")]
#[command(about = "Content-based game recommender", long_about = None)]
struct Args {
    /// Path to the games CSV
    #[arg(short, long, default_value = "dataset_steam_games.csv")]
    dataset: PathBuf,

    /// Directory holding the similarity cache
    #[arg(short, long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Recompute even if a cache exists
    #[arg(long)]
    rebuild: bool,

    /// Trust an existing cache without checking the dataset fingerprint
    #[arg(long)]
    no_verify: bool,

    /// Number of recommendations per query
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Answer these titles and exit instead of prompting
    #[arg(short, long)]
    query: Vec<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gamerec v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);
    info!("Cache directory: {:?}", args.cache_dir);

    let manager = StorageManager::new(StoreConfig {
        dataset_path: args.dataset,
        cache_dir: args.cache_dir,
        verify_fingerprint: !args.no_verify,
        force_rebuild: args.rebuild,
    })?;

    let (recommender, source) = manager.open()?;
    if let LoadSource::Rebuilt { reason } = &source {
        info!("Cache rebuilt: {}", reason);
    }
    let recommender = recommender.with_limit(args.top_k)?;
    info!("Ready with {} games", recommender.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.query.is_empty() {
        for title in &args.query {
            session::answer(&recommender, title, &mut out)?;
        }
        out.flush()?;
        return Ok(());
    }

    session::run(&recommender, io::stdin().lock(), &mut out)?;
    Ok(())
}
