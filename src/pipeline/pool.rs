//! Worker pool: orchestrates one index build.
//!
//! The pool is responsible for:
//! - Creating a fresh queue and index for every build
//! - Starting the workers and the directory scanner
//! - Waiting until every worker has observed end-of-stream
//! - Aggregating per-worker outcomes into a [`BuildReport`]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::pipeline::config::BuildConfig;
use crate::pipeline::queue::FileQueue;
use crate::pipeline::scanner::DirectoryScanner;
use crate::pipeline::shutdown::ShutdownHandle;
use crate::pipeline::worker::{IndexWorker, WorkerHandle, WorkerOutcome};

/// Result of a completed build.
///
/// Every file found by the scanner is accounted for exactly once: it was
/// indexed, it is in `failures`, or it is in `skipped`.
#[derive(Debug)]
pub struct BuildReport {
    /// The populated, read-only index.
    pub index: InvertedIndex,

    /// Files found in the directory.
    pub files_discovered: usize,

    /// Files fully merged into the index.
    pub files_indexed: usize,

    /// Tokens read across all indexed files.
    pub tokens_indexed: u64,

    /// Per-file failures, sorted by path.
    pub failures: Vec<IndexError>,

    /// Files left unprocessed because shutdown was requested, sorted.
    pub skipped: Vec<PathBuf>,

    /// Total execution time.
    pub execution_time: Duration,
}

impl BuildReport {
    /// Whether shutdown cut the build short.
    pub fn interrupted(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Whether every discovered file was indexed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    /// Fail with [`IndexError::Interrupted`] if shutdown cut the build short.
    pub fn ensure_not_interrupted(&self) -> Result<()> {
        if self.interrupted() {
            return Err(IndexError::interrupted(format!(
                "{} of {} files were not indexed",
                self.skipped.len(),
                self.files_discovered
            )));
        }
        Ok(())
    }

    /// Take the index, discarding the statistics.
    pub fn into_index(self) -> InvertedIndex {
        self.index
    }
}

/// Runs index builds with a fixed number of workers.
pub struct WorkerPool {
    config: BuildConfig,
    tokenizer: Arc<dyn Tokenizer>,
    shutdown: ShutdownHandle,
}

impl WorkerPool {
    /// Create a pool. Fails if the configuration is invalid.
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
            shutdown: ShutdownHandle::new(),
        })
    }

    /// Use a different tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Handle that stops a running build from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Index every file directly inside `dir`.
    ///
    /// Blocks until all workers have finished. Fails if the directory cannot be
    /// listed; unreadable files are reported in [`BuildReport::failures`].
    pub fn build<P: AsRef<Path>>(&self, dir: P) -> Result<BuildReport> {
        let dir = dir.as_ref();
        let start = Instant::now();

        info!(
            "Indexing {} with {} workers (queue capacity {})",
            dir.display(),
            self.config.worker_count,
            self.config.queue_capacity
        );

        let queue = Arc::new(FileQueue::new(self.config.queue_capacity));
        let index = Arc::new(InvertedIndex::with_shards(self.config.shard_count));

        let workers = self.spawn_workers(&queue, &index)?;

        let scanner = DirectoryScanner::new(Arc::clone(&queue), self.shutdown.clone())
            .with_extension(self.config.extension.clone());
        let scan = scanner.spawn(dir.to_path_buf()).and_then(|handle| {
            handle
                .join()
                .map_err(|_| IndexError::thread_join("directory scanner panicked"))?
        });

        // The scanner closes the queue itself; this covers a scanner that never started.
        queue.close();
        let outcomes = Self::join_workers(workers);

        let scan = scan?;
        let outcomes = outcomes?;
        drop(queue);

        let index = Arc::try_unwrap(index)
            .map_err(|_| IndexError::internal("index still shared after workers finished"))?;

        let mut report = BuildReport {
            index,
            files_discovered: scan.discovered,
            files_indexed: 0,
            tokens_indexed: 0,
            failures: Vec::new(),
            skipped: scan.not_enqueued,
            execution_time: Duration::ZERO,
        };
        for outcome in outcomes {
            report.files_indexed += outcome.files_indexed;
            report.tokens_indexed += outcome.tokens;
            report.failures.extend(outcome.failures);
            report.skipped.extend(outcome.skipped);
        }
        report.failures.sort_by(|a, b| a.path().cmp(&b.path()));
        report.skipped.sort();
        report.execution_time = start.elapsed();

        if report.interrupted() {
            warn!(
                "Build of {} interrupted: {} files skipped",
                dir.display(),
                report.skipped.len()
            );
        }
        info!(
            "Indexed {} of {} files ({} terms, {} failed) in {:?}",
            report.files_indexed,
            report.files_discovered,
            report.index.term_count(),
            report.failures.len(),
            report.execution_time
        );

        Ok(report)
    }

    /// Spawn the configured number of workers. On failure the queue is closed
    /// and the workers already running are joined before returning.
    fn spawn_workers(
        &self,
        queue: &Arc<FileQueue>,
        index: &Arc<InvertedIndex>,
    ) -> Result<Vec<WorkerHandle>> {
        let mut workers = Vec::with_capacity(self.config.worker_count);

        for id in 0..self.config.worker_count {
            let worker = IndexWorker::new(
                id,
                Arc::clone(queue),
                Arc::clone(index),
                Arc::clone(&self.tokenizer),
                self.shutdown.clone(),
            );

            match worker.spawn() {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    queue.close();
                    if let Err(join_error) = Self::join_workers(workers) {
                        warn!("{join_error}");
                    }
                    return Err(e);
                }
            }
        }

        Ok(workers)
    }

    /// Join every worker, even if one of them panicked.
    fn join_workers(workers: Vec<WorkerHandle>) -> Result<Vec<WorkerOutcome>> {
        let mut outcomes = Vec::with_capacity(workers.len());
        let mut first_error = None;

        for worker in workers {
            match worker.join() {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("{e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(outcomes),
        }
    }
}

/// Index `dir` with `worker_count` workers and default settings otherwise.
pub fn build<P: AsRef<Path>>(dir: P, worker_count: usize) -> Result<BuildReport> {
    WorkerPool::new(BuildConfig::new().with_worker_count(worker_count))?.build(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DocumentStat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            WorkerPool::new(BuildConfig::new().with_worker_count(0)),
            Err(IndexError::InvalidConfig(_))
        ));
        assert!(build(".", 0).is_err());
    }

    #[test]
    fn test_build_small_directory() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "cat dog cat").unwrap();
        fs::write(&b, "dog dog cat").unwrap();

        let report = build(dir.path(), 3).unwrap();
        assert_eq!(report.files_discovered, 2);
        assert_eq!(report.files_indexed, 2);
        assert_eq!(report.tokens_indexed, 6);
        assert!(report.is_complete());
        assert!(report.ensure_not_interrupted().is_ok());

        let index = report.into_index();
        assert_eq!(
            index.lookup("cat"),
            vec![DocumentStat::new(&a, 2), DocumentStat::new(&b, 1)]
        );
        assert_eq!(index.most_relevant("dog"), Some(DocumentStat::new(&b, 2)));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let report = build(dir.path(), 2).unwrap();
        assert_eq!(report.files_discovered, 0);
        assert!(report.index.is_empty());
    }

    #[test]
    fn test_missing_directory_aborts() {
        let dir = TempDir::new().unwrap();
        let result = build(dir.path().join("nope"), 3);
        assert!(matches!(result, Err(IndexError::DirectoryAccess { .. })));
    }

    #[test]
    fn test_shutdown_before_build_skips_everything() {
        let dir = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("{i}.txt")), "word").unwrap();
        }

        let pool = WorkerPool::new(BuildConfig::default()).unwrap();
        pool.shutdown_handle().request();

        let report = pool.build(dir.path()).unwrap();
        assert!(report.interrupted());
        assert_eq!(report.files_indexed, 0);
        assert_eq!(report.skipped.len(), 5);
        assert!(report.index.is_empty());
        assert!(matches!(
            report.ensure_not_interrupted(),
            Err(IndexError::Interrupted(_))
        ));
    }

    struct PanickingTokenizer;

    impl Tokenizer for PanickingTokenizer {
        fn tokenize(&self, _text: &str) -> Vec<String> {
            panic!("tokenizer failure");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[test]
    fn test_panicking_workers_fail_the_build() {
        let dir = TempDir::new().unwrap();
        for i in 0..10 {
            fs::write(dir.path().join(format!("{i}.txt")), "cat dog").unwrap();
        }

        let pool = WorkerPool::new(BuildConfig::new().with_worker_count(2).with_queue_capacity(2))
            .unwrap()
            .with_tokenizer(Arc::new(PanickingTokenizer));

        let result = pool.build(dir.path());
        assert!(matches!(result, Err(IndexError::ThreadJoin(_))));
    }
}

