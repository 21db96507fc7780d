//! # PNG Optimizer Main Orchestrator
//!
//! Orchestratore principale che delega ai moduli specializzati.
//!
//! ## Flusso di esecuzione:
//! 1. **Validazione**: Controlla la configurazione (directory di input esistente)
//! 2. **Discovery**: Trova tutti i PNG sotto la directory di input
//! 3. **Conversione**: Un `TaskOptimizer` per file, fino a `workers` in parallelo
//! 4. **Report per-file**: Riga stampata appena il file è completato
//! 5. **Aggregazione**: Totali per directory e globali in `StatsAggregator`
//! 6. **Riepilogo**: Report per directory e totale a fine esecuzione
//!
//! ## Gestione concorrenza:
//! - `workers = 1`: elaborazione strettamente sequenziale
//! - `workers > 1`: `buffered` mantiene l'ordine di discovery nei risultati,
//!   quindi report e aggregazione restano su un solo consumer, senza lock
//!
//! ## Esempio:
//! ```ignore
//! let mut optimizer = MediaOptimizer::new(config)?;
//! let summary = optimizer.run(&mut std::io::stdout()).await?;
//! ```

use crate::{
    config::Config,
    file_manager::FileManager,
    optimizer::{reporter::Reporter, task_optimizer::TaskOptimizer},
    progress::ProgressManager,
    stats::StatsAggregator,
};
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: StatsAggregator,
    pub files_found: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn files_converted(&self) -> usize {
        self.stats.files_converted()
    }

    pub fn files_failed(&self) -> usize {
        self.stats.files_failed()
    }
}

/// Main conversion orchestrator
pub struct MediaOptimizer {
    config: Config,
    task_optimizer: TaskOptimizer,
}

impl MediaOptimizer {
    /// Create a new optimizer; fails fast on an invalid configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_task_optimizer(
            TaskOptimizer::new(config.output_root.clone(), config.preserve_alpha),
            config,
        ))
    }

    /// Use a custom per-file worker (e.g. a different codec)
    pub fn with_task_optimizer(task_optimizer: TaskOptimizer, config: Config) -> Self {
        Self {
            config,
            task_optimizer,
        }
    }

    /// Esegue la conversione e scrive il report su `out`
    pub async fn run<W: Write>(&mut self, out: W) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut reporter = Reporter::new(out, self.config.json_output);

        let files = FileManager::find_png_files(&self.config.input_root);
        self.log_configuration(files.len());
        reporter.start(&self.config, files.len())?;

        let progress = ProgressManager::new(
            files.len() as u64,
            self.config.show_progress && !self.config.json_output,
        );
        let mut stats = StatsAggregator::new();
        let files_found = files.len();

        let task_optimizer = &self.task_optimizer;
        let mut results = stream::iter(files)
            .map(|file| async move {
                let result = task_optimizer.process_single_file(&file).await;
                (file, result)
            })
            .buffered(self.config.workers);

        while let Some((file, result)) = results.next().await {
            progress.suspend(|| reporter.file_result(&file, &result))?;
            progress.update(&file.relative_path);
            stats.record(file.directory_key(), &result);
        }

        progress.finish();
        let duration = start_time.elapsed();
        reporter.summary(&stats, duration)?;

        info!(
            "Done: {} converted, {} failed in {:.2}s",
            stats.files_converted(),
            stats.files_failed(),
            duration.as_secs_f64()
        );

        Ok(RunSummary {
            stats,
            files_found,
            duration,
        })
    }

    fn log_configuration(&self, total_files: usize) {
        info!("Starting PNG conversion in: {}", self.config.input_root.display());
        info!("Output directory: {}", self.config.output_root.display());
        if self.config.preserve_alpha {
            info!("Mode: RGBA (alpha preserved)");
        } else {
            info!("Mode: RGB (alpha dropped)");
        }
        debug!("Workers: {}", self.config.workers);
        info!("Found {} PNG files to process", total_files);
    }
}
