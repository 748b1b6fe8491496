/*!
protest-map Command Line Interface

Generates the protest map once as a standalone page, or runs the watch
loop that keeps the embed include files current for a static-site build.
*/

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protest_map::config::AppConfig;
use protest_map::{pipeline, watch, VERSION};

#[derive(Parser)]
#[command(name = "protest-map")]
#[command(about = "Static interactive map generation for protest event data")]
#[command(version = VERSION)]
pub struct Cli {
    /// Generate a single self-contained HTML page and exit
    #[arg(long)]
    pub standalone: bool,

    /// Path to the TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "protest_map=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.standalone {
        println!("Generating standalone map...");
        pipeline::generate_standalone(&config)?;
        println!("Map generation complete.");
    } else {
        let cancel = watch::cancel_flag()?;
        println!("Watching input directory for changes every ten seconds.");
        watch::watch(
            &config.input.watch_dir,
            watch::POLL_INTERVAL,
            &cancel,
            || pipeline::generate_embed(&config),
        )?;
    }

    Ok(())
}
