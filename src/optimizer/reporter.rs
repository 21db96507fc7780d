//! # Reporter Module
//!
//! Emette il report della conversione: una riga per file appena convertito,
//! poi il riepilogo per directory e il totale a fine esecuzione.
//!
//! Formato testo:
//! ```text
//! ✅ sub/y.png | Before: 19.53 KB | After: 17.58 KB
//! ❌ Error processing sub/bad.png: Decode error: ...
//!
//! === Summary by folder ===
//! [root]: Before = 9.77 KB | After = 8.79 KB
//!
//! === Total summary ===
//! Total before: 29.30 KB
//! Total after : 26.37 KB
//! ```
//!
//! In modalità JSON ogni evento è un `JsonMessage` su una riga.

use crate::{
    config::Config,
    file_manager::{DiscoveredFile, FileManager},
    json_output::JsonMessage,
    stats::{ConversionResult, StatsAggregator},
};
use std::io::{self, Write};
use std::time::Duration;

/// Label shown for the empty directory key
pub const ROOT_LABEL: &str = "[root]";

const MARKER_SHRANK: &str = "✅";
const MARKER_GREW: &str = "⚠️";
const MARKER_ERROR: &str = "❌";

/// Line-oriented report writer
pub struct Reporter<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Start event; the text report has no header line
    pub fn start(&mut self, config: &Config, total_files: usize) -> io::Result<()> {
        if !self.json {
            return Ok(());
        }
        let msg = JsonMessage::Start {
            input_dir: config.input_root.clone(),
            output_dir: config.output_root.clone(),
            total_files,
            preserve_alpha: config.preserve_alpha,
            workers: config.workers,
        };
        writeln!(self.out, "{}", msg.to_line())
    }

    /// Per-file line, emitted as soon as the file is done
    pub fn file_result(&mut self, file: &DiscoveredFile, result: &ConversionResult) -> io::Result<()> {
        match result {
            ConversionResult::Success {
                original_size,
                new_size,
            } => {
                if self.json {
                    let msg = JsonMessage::FileComplete {
                        path: file.relative_path.clone(),
                        original_size: *original_size,
                        new_size: *new_size,
                        grew: new_size > original_size,
                    };
                    return writeln!(self.out, "{}", msg.to_line());
                }
                let marker = if new_size <= original_size {
                    MARKER_SHRANK
                } else {
                    MARKER_GREW
                };
                writeln!(
                    self.out,
                    "{} {} | Before: {} KB | After: {} KB",
                    marker,
                    file.relative_path,
                    FileManager::format_kib(*original_size),
                    FileManager::format_kib(*new_size)
                )
            }
            ConversionResult::Failure {
                relative_path,
                message,
            } => {
                if self.json {
                    let msg = JsonMessage::FileError {
                        path: relative_path.clone(),
                        message: message.clone(),
                    };
                    return writeln!(self.out, "{}", msg.to_line());
                }
                writeln!(
                    self.out,
                    "{} Error processing {}: {}",
                    MARKER_ERROR, relative_path, message
                )
            }
        }
    }

    /// Per-directory lines followed by the grand total
    pub fn summary(&mut self, stats: &StatsAggregator, duration: Duration) -> io::Result<()> {
        if self.json {
            for (directory, dir_stats) in stats.directories() {
                let msg = JsonMessage::DirectorySummary {
                    directory: directory.to_string(),
                    before: dir_stats.before_total,
                    after: dir_stats.after_total,
                };
                writeln!(self.out, "{}", msg.to_line())?;
            }
            let totals = stats.totals();
            let msg = JsonMessage::Complete {
                files_converted: stats.files_converted(),
                files_failed: stats.files_failed(),
                total_before: totals.before_total,
                total_after: totals.after_total,
                duration_seconds: duration.as_secs_f64(),
            };
            return writeln!(self.out, "{}", msg.to_line());
        }

        writeln!(self.out, "\n=== Summary by folder ===")?;
        for (directory, dir_stats) in stats.directories() {
            let label = if directory.is_empty() { ROOT_LABEL } else { directory };
            writeln!(
                self.out,
                "{}: Before = {} KB | After = {} KB",
                label,
                FileManager::format_kib(dir_stats.before_total),
                FileManager::format_kib(dir_stats.after_total)
            )?;
        }

        let totals = stats.totals();
        writeln!(self.out, "\n=== Total summary ===")?;
        writeln!(self.out, "Total before: {} KB", FileManager::format_kib(totals.before_total))?;
        writeln!(self.out, "Total after : {} KB", FileManager::format_kib(totals.after_total))?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
