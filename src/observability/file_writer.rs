//! Rotating file writer with size-based rotation and backup retention.
//!
//! This module provides a thread-safe writer that automatically rotates the
//! log file when it exceeds a size threshold, keeping a fixed number of
//! timestamped backups. It plugs into `tracing_subscriber::fmt` through
//! [`MakeWriter`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// When the current file exceeds the size limit it is renamed to
/// `<name>.<local timestamp>` and a fresh file is started. Backups beyond the
/// retention limit are removed, oldest first.
///
/// # Example
///
/// ```rust
/// use movieflix_core::observability::FileWriter;
///
/// let writer = FileWriter::new(std::env::temp_dir().join("movieflix-doc.log"));
/// writer.write_line("list store started").unwrap();
/// ```
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer rotating after `max_bytes` and keeping `max_backups`.
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Writes `line` followed by a newline, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened, written or flushed.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self.lock()?;
        let file = self.prepare(&mut guard)?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Option<File>>> {
        self.writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))
    }

    /// Rotates if the file is over the limit, then returns an open handle.
    fn prepare<'g>(&self, slot: &'g mut Option<File>) -> io::Result<&'g mut File> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *slot = None;
                self.rotate_files()?;
            }
        }

        if slot.is_none() {
            if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
            *slot = Some(file);
        }

        slot.as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))
    }

    /// Renames the current file to a timestamped backup and prunes old ones.
    fn rotate_files(&self) -> io::Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let stamp = chrono::Local::now().format("%Y%m%dT%H%M%S%.9f").to_string();
        let mut backup_path = self.backup_path(&stamp);
        let mut attempt = 1;
        while backup_path.exists() {
            backup_path = self.backup_path(&format!("{stamp}-{attempt}"));
            attempt += 1;
        }

        fs::rename(&self.file_path, &backup_path)?;
        self.cleanup_old_backups()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(suffix);
        self.file_path.with_file_name(name)
    }

    /// Backups of this file, newest first.
    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let parent_dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically.
        backups.sort_by(|a, b| b.cmp(a));
        Ok(backups)
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        for old_backup in self.backups()?.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.lock()?;
        let file = self.prepare(&mut guard)?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.lock()?.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
