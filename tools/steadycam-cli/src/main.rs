//! Steadycam CLI: replay detection streams through the virtual cameraman.
//!
//! Usage:
//!   steadycam direct <DETECTIONS>   Compute crop decisions for a detection stream
//!   steadycam simulate              Write a synthetic jittering-subject stream
//!   steadycam config                Show or write the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use steadycam_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "steadycam",
    about = "Virtual cameraman: steady pan/zoom crops from noisy detections",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute crop decisions for a detection stream
    Direct {
        /// Detection stream (JSON lines, optional `#` header)
        path: PathBuf,

        /// Write crop decisions here (JSON lines)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Working resolution of the detections, e.g. 640x360
        #[arg(long)]
        working: Option<String>,

        /// Source resolution to crop, e.g. 1920x1080
        #[arg(long)]
        source: Option<String>,
    },

    /// Write a synthetic stream of one subject jittering in place
    Simulate {
        /// Number of frames
        #[arg(long, default_value = "300")]
        frames: u64,

        /// Horizontal jitter amplitude in working pixels
        #[arg(long, default_value = "2.0")]
        jitter: f64,

        /// Subject X in working pixels (default: frame center)
        #[arg(long)]
        x: Option<f64>,

        /// Subject Y in working pixels (default: frame center)
        #[arg(long)]
        y: Option<f64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Write the default configuration to the standard location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    steadycam_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Direct {
            path,
            output,
            working,
            source,
        } => commands::direct::run(&config, path, output, working, source),
        Commands::Simulate {
            frames,
            jitter,
            x,
            y,
            output,
        } => commands::simulate::run(&config, frames, jitter, x, y, output),
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
