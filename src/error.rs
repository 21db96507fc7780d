//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore per la conversione di un singolo file.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare i fallimenti per-file
//! - Fornisce messaggi leggibili che finiscono nella riga di errore del report
//! - Integra con `thiserror` per la conversione automatica
//!
//! ## Categorie di errori:
//! - `Decode`: Il file non è un PNG valido (header corrotto, dati troncati)
//! - `Encode`: Il buffer normalizzato non può essere ricodificato
//! - `DirectoryCreation`: La directory di output non può essere creata
//! - `FileIo`: Errori generici di lettura/scrittura
//! - `Codec`: Il worker del codec è andato in panic o è stato cancellato
//!
//! ## Propagazione:
//! Nessuna variante è fatale per l'esecuzione: ogni errore viene catturato
//! al confine del singolo file e trasformato in `ConversionResult::Failure`.
//! Gli errori di setup (configurazione, directory di input) usano `anyhow`.

use std::path::PathBuf;

/// Per-file conversion failures
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Decode error: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Encode error: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error on {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Codec worker failed: {0}")]
    Codec(String),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_carry_cause() {
        let err = ConvertError::io(
            "out/a.png",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/a.png"));
        assert!(msg.contains("denied"));

        let err = ConvertError::DirectoryCreation {
            path: PathBuf::from("out/sub"),
            source: io::Error::new(io::ErrorKind::Other, "read-only file system"),
        };
        assert!(err.to_string().starts_with("Failed to create output directory out/sub"));
    }
}
