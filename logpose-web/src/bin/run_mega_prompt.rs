//! Batch mega-prompt generation
//!
//! Renders the extended analysis for a range of episodes and writes them,
//! separated by rule lines, to a single text file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use logpose_common::config::{Config, ConfigOverrides};
use logpose_common::mega_prompt::{self, AnalysisDepth};
use logpose_common::EpisodeStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "run-mega-prompt")]
#[command(about = "Generate mega-prompt analyses for a range of episodes")]
#[command(version)]
struct Args {
    /// Content root holding public/episode
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First episode (inclusive)
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Last episode (inclusive)
    #[arg(long, default_value_t = 10)]
    end: u32,

    /// Output file
    #[arg(short, long, default_value = "mega-prompt-output.txt")]
    output: PathBuf,

    /// Use the shorter table served by the HTTP endpoint
    #[arg(long)]
    standard: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(ConfigOverrides {
        config_path: args.config,
        root_folder: args.root_folder,
        ..Default::default()
    })
    .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .init();
    config.log_source();

    if args.start > args.end {
        bail!("--start ({}) must not be after --end ({})", args.start, args.end);
    }

    let depth = if args.standard {
        AnalysisDepth::Standard
    } else {
        AnalysisDepth::Extended
    };

    let store = EpisodeStore::from_config(&config);
    let output = mega_prompt::generate_batch(&store, args.start..=args.end, depth)
        .await
        .context("Mega prompt generation failed")?;

    tokio::fs::write(&args.output, output)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Analysis complete! Check {}", args.output.display());
    Ok(())
}
