//! # Size Statistics Module
//!
//! Questo modulo aggrega le dimensioni prima/dopo per directory e in totale.
//!
//! ## Strutture dati:
//! - `ConversionResult`: Esito di un singolo file (successo o fallimento)
//! - `DirectoryStats`: Totali prima/dopo di una directory
//! - `RunTotals`: Totali prima/dopo dell'intera esecuzione
//! - `StatsAggregator`: Tabella directory -> stats, in ordine di prima apparizione
//!
//! ## Regole di aggregazione:
//! - Ogni successo contribuisce una sola volta alla sua directory e ai totali
//! - I fallimenti non toccano né le directory né i totali
//! - La chiave directory è il parent del path relativo, `""` per i file top-level
//!
//! ## Esempio:
//! ```ignore
//! let mut stats = StatsAggregator::new();
//! stats.record("sub", &ConversionResult::success(20_000, 18_000));
//! assert_eq!(stats.totals().before_total, 20_000);
//! ```

use std::collections::HashMap;

/// Outcome of converting one discovered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success { original_size: u64, new_size: u64 },
    Failure { relative_path: String, message: String },
}

impl ConversionResult {
    pub fn success(original_size: u64, new_size: u64) -> Self {
        Self::Success {
            original_size,
            new_size,
        }
    }

    pub fn failure(relative_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure {
            relative_path: relative_path.into(),
            message: message.into(),
        }
    }
}

/// Before/after byte totals of one directory
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryStats {
    pub before_total: u64,
    pub after_total: u64,
}

impl DirectoryStats {
    fn add(&mut self, original_size: u64, new_size: u64) {
        self.before_total += original_size;
        self.after_total += new_size;
    }
}

/// Before/after byte totals of the whole run
pub type RunTotals = DirectoryStats;

/// Statistics tracker for one run
#[derive(Debug, Default, Clone)]
pub struct StatsAggregator {
    index: HashMap<String, usize>,
    directories: Vec<(String, DirectoryStats)>,
    totals: RunTotals,
    files_converted: usize,
    files_failed: usize,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, zero-initialized on first access
    pub fn get_or_insert(&mut self, key: &str) -> &mut DirectoryStats {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.directories.push((key.to_string(), DirectoryStats::default()));
                let idx = self.directories.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.directories[idx].1
    }

    /// Fold one result into the tables. Failures only bump the failure counter.
    pub fn record(&mut self, directory_key: &str, result: &ConversionResult) {
        match *result {
            ConversionResult::Success {
                original_size,
                new_size,
            } => {
                self.get_or_insert(directory_key).add(original_size, new_size);
                self.totals.add(original_size, new_size);
                self.files_converted += 1;
            }
            ConversionResult::Failure { .. } => {
                self.files_failed += 1;
            }
        }
    }

    /// Directories with at least one success, in first-seen order
    pub fn directories(&self) -> impl Iterator<Item = (&str, &DirectoryStats)> {
        self.directories.iter().map(|(key, stats)| (key.as_str(), stats))
    }

    pub fn directory(&self, key: &str) -> Option<&DirectoryStats> {
        self.index.get(key).map(|&idx| &self.directories[idx].1)
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    pub fn files_converted(&self) -> usize {
        self.files_converted
    }

    pub fn files_failed(&self) -> usize {
        self.files_failed
    }
}
