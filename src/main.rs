//! # PNG Batch Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Costruzione della configurazione (file JSON opzionale + argomenti)
//! - Avvio dell'optimizer con il report su stdout
//!
//! ## Esempio di utilizzo:
//! ```bash
//! png-optimizer ./input ./output --no-alpha --workers 4
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use png_batch_optimizer::{Config, MediaOptimizer};

#[derive(Parser)]
#[command(name = "png-optimizer")]
#[command(about = "Re-encode PNG trees with normalized color mode and report size changes")]
struct Args {
    /// Directory containing PNG files to convert
    input_root: Option<PathBuf>,

    /// Directory receiving the mirrored output tree
    output_root: Option<PathBuf>,

    /// Write 3-channel RGB output instead of RGBA
    #[arg(long)]
    no_alpha: bool,

    /// Number of concurrent conversions
    #[arg(short, long)]
    workers: Option<usize>,

    /// Emit one JSON object per event instead of the text report
    #[arg(long)]
    json: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// JSON configuration file used as the base configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    async fn into_config(self) -> Result<Config> {
        let mut config = match self.config {
            Some(ref path) => {
                if !path.exists() {
                    return Err(anyhow::anyhow!("Config file does not exist: {}", path.display()));
                }
                Config::from_file(path).await?
            }
            None => Config::default(),
        };

        if let Some(input_root) = self.input_root {
            config.input_root = input_root;
        }
        if let Some(output_root) = self.output_root {
            config.output_root = output_root;
        }
        if self.no_alpha {
            config.preserve_alpha = false;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.json {
            config.json_output = true;
        }
        if self.no_progress {
            config.show_progress = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.into_config().await?;
    let mut optimizer = MediaOptimizer::new(config)?;
    optimizer.run(std::io::stdout().lock()).await?;

    Ok(())
}
