//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file PNG e le utilità sulle dimensioni.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file PNG sotto la directory di input
//! - Calcolo del path relativo normalizzato (separatore `/`) per ogni file
//! - Lettura delle dimensioni su disco
//! - Formattazione delle dimensioni in KB con due decimali
//!
//! ## Comportamento della discovery:
//! - Estensione `.png` case-insensitive (`a.PNG`, `b.Png` inclusi)
//! - Solo file regolari, nessun path visitato due volte
//! - Ordine delle entry come restituito dal filesystem
//! - Root inesistente o illeggibile: sequenza vuota, nessun errore
//!
//! ## Esempio:
//! ```ignore
//! for file in FileManager::discover(Path::new("assets")) {
//!     println!("{}", file.relative_path);
//! }
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension handled by the converter, compared case-insensitively
pub const SUPPORTED_EXTENSION: &str = "png";

/// A file found under the input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as produced by the walk (input root joined with the relative part)
    pub path: PathBuf,
    /// Path relative to the input root, byte-exact; used to build the output path
    pub relative: PathBuf,
    /// `relative` as a `/`-separated string for display and directory keys
    pub relative_path: String,
}

impl DiscoveredFile {
    pub fn new(input_root: &Path, path: PathBuf) -> Self {
        let relative = match path.strip_prefix(input_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.file_name().map(PathBuf::from).unwrap_or_default(),
        };
        let relative_path = normalize_relative(&relative);
        Self {
            path,
            relative,
            relative_path,
        }
    }

    /// Parent of the relative path; empty for top-level files
    pub fn directory_key(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[..idx],
            None => "",
        }
    }

    /// File name component, used by error lines
    pub fn display_name(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[idx + 1..],
            None => &self.relative_path,
        }
    }
}

/// Joins the components of a relative path with `/` regardless of platform.
/// Non-UTF-8 components are escaped (`\xFF`) so distinct names stay distinct.
pub fn normalize_relative(rel: &Path) -> String {
    rel.components()
        .map(|c| component_label(c.as_os_str()))
        .collect::<Vec<_>>()
        .join("/")
}

fn component_label(name: &OsStr) -> String {
    match name.to_str() {
        Some(s) => s.to_string(),
        None => {
            let escaped = format!("{:?}", name);
            escaped.trim_matches('"').to_string()
        }
    }
}

/// Manages file discovery and size helpers
pub struct FileManager;

impl FileManager {
    /// Lazily walk `input_root`, yielding every supported file.
    /// Symlinks are followed; entries keep the link's own path.
    pub fn discover(input_root: &Path) -> impl Iterator<Item = DiscoveredFile> + '_ {
        WalkDir::new(input_root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| Self::is_supported_format(e.path()))
            .map(move |e| DiscoveredFile::new(input_root, e.into_path()))
    }

    /// Collect all supported files in a directory
    pub fn find_png_files(input_root: &Path) -> Vec<DiscoveredFile> {
        Self::discover(input_root).collect()
    }

    /// Check if a file format is supported
    pub fn is_supported_format(path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                name.to_string_lossy()
                    .to_lowercase()
                    .ends_with(&format!(".{}", SUPPORTED_EXTENSION))
            })
            .unwrap_or(false)
    }

    /// Size of the file on disk
    pub async fn file_size(path: &Path) -> std::io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    /// Bytes as kibibytes with two decimals, e.g. `10000` -> `"9.77"`
    pub fn format_kib(bytes: u64) -> String {
        format!("{:.2}", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_supported_format_case_insensitive() {
        assert!(FileManager::is_supported_format(Path::new("a/b.png")));
        assert!(FileManager::is_supported_format(Path::new("B.PNG")));
        assert!(FileManager::is_supported_format(Path::new("c.Png")));
        assert!(!FileManager::is_supported_format(Path::new("d.jpg")));
        assert!(!FileManager::is_supported_format(Path::new("png")));
        assert!(!FileManager::is_supported_format(Path::new("e.png.bak")));
    }

    #[test]
    fn test_discover_recursive_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.png"), b"x").unwrap();
        fs::write(root.join("a/mid.PNG"), b"x").unwrap();
        fs::write(root.join("a/b/deep.png"), b"x").unwrap();
        fs::write(root.join("a/notes.txt"), b"x").unwrap();
        fs::create_dir(root.join("a/dir.png")).unwrap();

        let mut found: Vec<String> = FileManager::discover(root)
            .map(|f| f.relative_path)
            .collect();
        found.sort();

        assert_eq!(found, vec!["a/b/deep.png", "a/mid.PNG", "top.png"]);
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert_eq!(FileManager::discover(&missing).count(), 0);
    }

    #[test]
    fn test_directory_key() {
        let root = Path::new("/in");
        let nested = DiscoveredFile::new(root, PathBuf::from("/in/a/b/c.png"));
        assert_eq!(nested.relative_path, "a/b/c.png");
        assert_eq!(nested.directory_key(), "a/b");
        assert_eq!(nested.display_name(), "c.png");

        let top = DiscoveredFile::new(root, PathBuf::from("/in/c.png"));
        assert_eq!(top.directory_key(), "");
        assert_eq!(top.display_name(), "c.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_stay_distinct() {
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/in");
        let dir_a = OsStr::from_bytes(b"\xffdir");
        let dir_b = OsStr::from_bytes(b"\xfedir");
        let a = DiscoveredFile::new(root, root.join(dir_a).join("c.png"));
        let b = DiscoveredFile::new(root, root.join(dir_b).join("c.png"));

        assert_eq!(a.relative, Path::new(dir_a).join("c.png"));
        assert_ne!(a.relative_path, b.relative_path);
        assert_ne!(a.directory_key(), b.directory_key());
        assert_eq!(a.display_name(), "c.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_file_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("in");
        fs::create_dir_all(&root).unwrap();
        let target = temp_dir.path().join("target.png");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, root.join("link.png")).unwrap();

        let found: Vec<DiscoveredFile> = FileManager::discover(&root).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].relative_path, "link.png");
        assert_eq!(found[0].path, root.join("link.png"));
    }

    #[test]
    fn test_format_kib() {
        assert_eq!(FileManager::format_kib(10_000), "9.77");
        assert_eq!(FileManager::format_kib(20_000), "19.53");
        assert_eq!(FileManager::format_kib(30_000), "29.30");
        assert_eq!(FileManager::format_kib(0), "0.00");
    }
}
