//! # JSON Output Module
//!
//! Questo modulo definisce l'output strutturato in JSON, una riga per evento.
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio esecuzione con configurazione e numero di file
//! - `file_complete`: File convertito con dimensioni prima/dopo
//! - `file_error`: File fallito con messaggio d'errore
//! - `directory_summary`: Totali di una directory
//! - `complete`: Fine esecuzione con totali globali
//!
//! Le dimensioni sono sempre in byte, senza arrotondamenti.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        preserve_alpha: bool,
        workers: usize,
    },

    FileComplete {
        path: String,
        original_size: u64,
        new_size: u64,
        grew: bool,
    },

    FileError {
        path: String,
        message: String,
    },

    DirectorySummary {
        /// Empty for top-level files
        directory: String,
        before: u64,
        after: u64,
    },

    Complete {
        files_converted: usize,
        files_failed: usize,
        total_before: u64,
        total_after: u64,
        duration_seconds: f64,
    },
}

impl JsonMessage {
    /// Serialize as a single line
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"serialization failed: {}"}}"#, e)
        })
    }
}
