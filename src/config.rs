//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una singola esecuzione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri della conversione
//! - Fornisce validazione dei parametri prima dell'avvio
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `input_root`: Directory sorgente da scandire (default: "input")
//! - `output_root`: Directory di destinazione speculare (default: "output")
//! - `preserve_alpha`: RGBA se true, RGB se false (default: true)
//! - `workers`: Conversioni concorrenti (default: 1 = sequenziale)
//! - `json_output`: Report JSON line-oriented invece del testo (default: false)
//! - `show_progress`: Mostra la progress bar (default: true)
//!
//! ## Validazione:
//! - Controlla che workers sia > 0
//! - Controlla che la directory di input esista e sia una directory
//! - Controlla che input e output non coincidano
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     input_root: "assets".into(),
//!     output_root: "assets-optimized".into(),
//!     preserve_alpha: false,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a conversion run. Fixed for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the tree to scan
    pub input_root: PathBuf,
    /// Root of the mirrored output tree
    pub output_root: PathBuf,
    /// Normalize to RGBA when true, RGB when false
    pub preserve_alpha: bool,
    /// Number of concurrent conversions
    pub workers: usize,
    /// Emit JSON lines instead of the text report
    pub json_output: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("input"),
            output_root: PathBuf::from("output"),
            preserve_alpha: true,
            workers: 1,
            json_output: false,
            show_progress: true,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow::anyhow!("Number of workers must be greater than 0"));
        }

        if !self.input_root.exists() {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {}",
                self.input_root.display()
            ));
        }
        if !self.input_root.is_dir() {
            return Err(anyhow::anyhow!(
                "Input path is not a directory: {}",
                self.input_root.display()
            ));
        }

        if self.output_root.exists() && !self.output_root.is_dir() {
            return Err(anyhow::anyhow!(
                "Output path is not a directory: {}",
                self.output_root.display()
            ));
        }

        if same_directory(&self.input_root, &self.output_root) {
            return Err(anyhow::anyhow!(
                "Output directory must differ from input directory: {}",
                self.output_root.display()
            ));
        }

        Ok(())
    }

    /// Load configuration from file, falling back to defaults if it is missing
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
