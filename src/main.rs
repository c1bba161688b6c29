use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

mod config;
mod error;
mod platform;

use platform::Platform;

/// Update tauri.conf.json with platform-specific FFmpeg binary paths.
///
/// Run before `tauri build` so the ffmpeg/ffprobe executables for the target
/// platform are bundled as resources with the application.
#[derive(Parser, Debug)]
#[command(name = "tauri-bundle-patch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target platform: macos-aarch64, macos-x86_64, linux-x86_64, windows-x86_64
    #[arg(long)]
    platform: String,

    /// Path to tauri.conf.json
    #[arg(long, default_value = "tauri.conf.json")]
    config: PathBuf,

    /// Show what would be written without touching the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run_with(args)
}

fn run_with(args: Args) -> Result<()> {
    // Resolve the platform before any file I/O so a typo costs nothing.
    let platform = Platform::from_str(&args.platform)?;
    let resources = platform.resources();
    tracing::debug!(%platform, ?resources, "resolved bundle resources");

    let mut config = config::load_config(&args.config)?;
    config::apply_resources(&mut config, &resources)?;

    if args.dry_run {
        println!("Would update {} for {}", args.config.display(), platform);
        println!("Resources: {}", resources.join(", "));
        return Ok(());
    }

    config::save_config(&args.config, &config)
        .with_context(|| format!("Failed to update {}", args.config.display()))?;

    println!("Updated {} for {}", args.config.display(), platform);
    println!("Resources: {}", resources.join(", "));

    Ok(())
}

/// Initialize logging
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}
