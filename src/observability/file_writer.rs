//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`RotatingFile`] is the sink of the `fmt` layer. It appends each formatted
//! event to the log file and rotates the file once it grows past a size limit,
//! keeping a fixed number of backups so the log never grows without bound.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If the size exceeds the limit, rotate:
///    - Rename the current file to `<name>.<timestamp>-<seq>`
///    - Open a new empty file on the next write
///    - Remove the oldest backups beyond the retention count
pub struct RotatingFile {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    handle: Mutex<Option<File>>,
    rotations: AtomicU64,
}

impl RotatingFile {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
            rotations: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `bytes` to the file, rotating first if it is too large.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or if rotating, opening or writing fails.
    pub fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut handle)?;

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *handle = Some(file);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;
        file.write_all(bytes)?;
        file.flush()
    }

    fn check_and_rotate(&self, handle: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *handle = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn file_name(&self) -> io::Result<&str> {
        self.file_path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::other("Invalid file name"))
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
        let seq = self.rotations.fetch_add(1, Ordering::Relaxed);
        let backup_path = self
            .file_path
            .with_file_name(format!("{}.{timestamp}-{seq:06}", self.file_name()?));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Returns existing backups, oldest first.
    ///
    /// # Errors
    ///
    /// Fails if the log directory cannot be read.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let parent_dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let prefix = format!("{}.", self.file_name()?);

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort();
        Ok(backups)
    }

    /// Removes backups beyond the retention limit.
    ///
    /// Individual deletion errors are ignored so cleanup continues.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(self.max_backups);
        for old_backup in backups.iter().take(excess) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

/// Per-event writer handed out to the `fmt` layer.
pub struct RotatingFileWriter<'a> {
    file: &'a RotatingFile,
}

impl Write for RotatingFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileWriter { file: self }
    }
}
