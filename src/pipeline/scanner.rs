//! Directory scanner: the producer side of the pipeline.
//!
//! The scanner lists the direct entries of one directory (no recursion),
//! keeps regular files, and feeds their paths to the [`FileQueue`]. The whole
//! listing is read before anything is enqueued, so a directory that fails to
//! list part way through never yields a partial build.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::error::{IndexError, Result};
use crate::pipeline::queue::FileQueue;
use crate::pipeline::shutdown::ShutdownHandle;

/// Name of the scanner thread.
pub const SCANNER_THREAD_NAME: &str = "wordindex-scanner";

/// Result of one directory scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Files found in the directory after filtering.
    pub discovered: usize,

    /// Files handed to the queue.
    pub enqueued: usize,

    /// Files never enqueued because shutdown was requested.
    pub not_enqueued: Vec<PathBuf>,
}

impl ScanOutcome {
    /// Whether the scan stopped before enqueuing every file.
    pub fn interrupted(&self) -> bool {
        !self.not_enqueued.is_empty()
    }
}

/// Closes the queue when dropped, including on unwind.
struct CloseOnDrop<'a>(&'a FileQueue);

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Lists a directory and feeds its files into a [`FileQueue`].
pub struct DirectoryScanner {
    queue: Arc<FileQueue>,
    shutdown: ShutdownHandle,
    extension: Option<String>,
}

impl DirectoryScanner {
    /// Create a scanner feeding `queue`.
    pub fn new(queue: Arc<FileQueue>, shutdown: ShutdownHandle) -> Self {
        Self {
            queue,
            shutdown,
            extension: None,
        }
    }

    /// Only keep files with this extension (without the dot).
    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match &self.extension {
            None => true,
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext == wanted.trim_start_matches('.')),
        }
    }

    /// Regular files directly inside `dir`, sorted by path.
    ///
    /// Symbolic links are followed; dangling links are ignored.
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| IndexError::directory_access(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IndexError::directory_access(dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| IndexError::directory_access(dir, e))?;

            let is_file = if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(metadata) => metadata.is_file(),
                    Err(e) => {
                        debug!("ignoring dangling link {}: {e}", path.display());
                        false
                    }
                }
            } else {
                file_type.is_file()
            };

            if is_file && self.matches_extension(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// List `dir`, enqueue every file, then close the queue.
    ///
    /// The queue is closed on every exit path, so workers always reach
    /// end-of-stream. Stops enqueuing as soon as shutdown is requested.
    pub fn scan(&self, dir: &Path) -> Result<ScanOutcome> {
        let _close = CloseOnDrop(&self.queue);

        let files = self.list(dir)?;
        let mut outcome = ScanOutcome {
            discovered: files.len(),
            ..Default::default()
        };
        debug!("found {} files in {}", files.len(), dir.display());

        let mut files = files.into_iter();
        for path in files.by_ref() {
            if self.shutdown.is_requested() {
                outcome.not_enqueued.push(path);
                break;
            }
            self.queue.enqueue(path)?;
            outcome.enqueued += 1;
        }
        outcome.not_enqueued.extend(files);

        if outcome.interrupted() {
            warn!(
                "shutdown requested, {} of {} files were not queued",
                outcome.not_enqueued.len(),
                outcome.discovered
            );
        }

        Ok(outcome)
    }

    /// Run [`scan`](Self::scan) on a dedicated thread.
    pub fn spawn(self, dir: PathBuf) -> Result<JoinHandle<Result<ScanOutcome>>> {
        thread::Builder::new()
            .name(SCANNER_THREAD_NAME.to_string())
            .spawn(move || self.scan(&dir))
            .map_err(|e| IndexError::thread_join(format!("failed to spawn scanner: {e}")))
    }
}
