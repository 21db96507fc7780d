//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output.
//! Il path di output rispecchia il path relativo dentro la directory di output.

use crate::{error::ConvertError, file_manager::DiscoveredFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// `output_root` joined with the file's relative path
    pub fn get_output_path(output_root: &Path, file: &DiscoveredFile) -> PathBuf {
        let result = output_root.join(&file.relative);
        debug!("Resolved output path: {} -> {}", file.path.display(), result.display());
        result
    }

    /// Resolve the output path and create its missing ancestors
    pub async fn map(output_root: &Path, file: &DiscoveredFile) -> Result<PathBuf, ConvertError> {
        let output_path = Self::get_output_path(output_root, file);
        Self::ensure_parent_dirs(&output_path).await?;
        Ok(output_path)
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> Result<(), ConvertError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConvertError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}
