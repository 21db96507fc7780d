//! # PNG Batch Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Errori per-file della conversione
//! - `file_manager`: Discovery dei PNG e utilità sulle dimensioni
//! - `image_processor`: Codec PNG (decode, normalizzazione, encode)
//! - `stats`: Aggregazione prima/dopo per directory e totale
//! - `optimizer`: Orchestratore, worker per-file, path e report
//! - `json_output`: Eventi JSON line-oriented
//! - `progress`: Progress bar
//!
//! ## Utilizzo:
//! ```ignore
//! use png_batch_optimizer::{Config, MediaOptimizer};
//!
//! let mut optimizer = MediaOptimizer::new(Config::default())?;
//! let summary = optimizer.run(std::io::stdout()).await?;
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod json_output;
pub mod optimizer;
pub mod progress;
pub mod stats;

pub use config::Config;
pub use error::ConvertError;
pub use file_manager::{DiscoveredFile, FileManager};
pub use optimizer::{MediaOptimizer, RunSummary};
pub use stats::{ConversionResult, DirectoryStats, RunTotals, StatsAggregator};
