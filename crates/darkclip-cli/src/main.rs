//! DarkClip command-line binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use darkclip_cli::input::resolve_queries;
use darkclip_cli::logging::init_tracing;
use darkclip_cli::AppConfig;
use darkclip_media::{list_candidates, rank_by_semantic_score, LocalClipExtractor};
use darkclip_models::ClipCategory;

#[derive(Parser)]
#[command(name = "darkclip")]
#[command(about = "Cut random clips from local footage for short-form videos", long_about = None)]
struct Cli {
    /// Local footage directory (overrides LOCAL_FOOTAGE_DIR)
    #[arg(long, global = true)]
    footage_dir: Option<PathBuf>,
    /// Output directory for clips (overrides ASSETS_DIR)
    #[arg(long, global = true)]
    assets_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract clip variations for each query and print them as JSON
    Extract {
        /// Visual queries, one per segment
        queries: Vec<String>,
        /// Read queries from the `keywords` array of a script JSON file
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Variations per query (overrides VARIATIONS_PER_QUERY)
        #[arg(short, long)]
        variations: Option<usize>,
    },
    /// Check that ffprobe and ffmpeg can be found
    CheckTools,
    /// Rank local footage by semantic relevance to a line of script
    Score {
        /// Script text
        text: String,
    },
}

#[derive(Serialize)]
struct ScoredFile {
    file: PathBuf,
    category: Option<ClipCategory>,
    score: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.footage_dir {
        config.footage_dir = dir;
    }
    if let Some(dir) = cli.assets_dir {
        config.assets_dir = dir;
    }

    init_tracing(config.log_json);
    config.validate()?;

    match cli.command {
        Command::Extract {
            queries,
            script,
            variations,
        } => {
            let queries = resolve_queries(&queries, script.as_deref())?;
            let variations = variations.unwrap_or(config.variations_per_query);
            info!(
                footage_dir = %config.footage_dir.display(),
                assets_dir = %config.assets_dir.display(),
                "Starting local clip extraction"
            );

            let mut extractor =
                LocalClipExtractor::with_tools(config.extractor_config(), config.tool_paths());
            let segments = extractor.extract_segments(&queries, variations).await;

            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        Command::CheckTools => {
            let tools = config.tool_paths();
            for (name, path) in [("ffprobe", &tools.ffprobe), ("ffmpeg", &tools.ffmpeg)] {
                match path {
                    Some(p) => println!("{}: {}", name, p.display()),
                    None => println!("{}: not found", name),
                }
            }
            tools.ensure_present()?;
        }
        Command::Score { text } => {
            let candidates = list_candidates(&config.footage_dir).await;
            let ranked: Vec<ScoredFile> = rank_by_semantic_score(&text, &candidates)
                .into_iter()
                .map(|m| ScoredFile {
                    file: m.path,
                    category: m.category,
                    score: m.score,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
    }

    Ok(())
}
