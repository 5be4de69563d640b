//! Index worker: the consumer side of the pipeline.
//!
//! Each worker:
//! - Pulls file paths from the [`FileQueue`] until end-of-stream
//! - Reads the file as UTF-8 and tallies its terms locally
//! - Merges every (term, count) pair into the shared [`InvertedIndex`]
//!
//! A file that cannot be read is recorded as a failure and the worker moves on.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ahash::AHashMap;
use log::{debug, error, warn};

use crate::analysis::tokenizer::Tokenizer;
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::pipeline::queue::FileQueue;
use crate::pipeline::shutdown::ShutdownHandle;

/// What a worker did over its lifetime.
#[derive(Debug, Default)]
pub struct WorkerOutcome {
    /// Worker ID
    pub worker_id: usize,

    /// Number of files merged into the index.
    pub files_indexed: usize,

    /// Tokens read across all indexed files.
    pub tokens: u64,

    /// Per-file read failures.
    pub failures: Vec<IndexError>,

    /// Paths dequeued after shutdown and left unprocessed.
    pub skipped: Vec<PathBuf>,
}

/// Drains the queue if the worker unwinds, so the scanner never blocks on a
/// queue nobody reads. The paths drained this way are discarded; the panic
/// still surfaces as [`IndexError::ThreadJoin`] when the worker is joined.
struct DrainOnPanic<'a> {
    worker_id: usize,
    queue: &'a FileQueue,
}

impl Drop for DrainOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!("worker {} panicked, draining the file queue", self.worker_id);
            while self.queue.dequeue().is_some() {}
        }
    }
}

/// Count the terms of `content`, line by line.
pub fn tally_terms(tokenizer: &dyn Tokenizer, content: &str) -> AHashMap<String, u64> {
    let mut tally = AHashMap::new();
    for line in content.lines() {
        for term in tokenizer.tokenize(line) {
            *tally.entry(term).or_insert(0) += 1;
        }
    }
    tally
}

/// Consumes file paths and merges their term counts into the index.
pub struct IndexWorker {
    id: usize,
    queue: Arc<FileQueue>,
    index: Arc<InvertedIndex>,
    tokenizer: Arc<dyn Tokenizer>,
    shutdown: ShutdownHandle,
}

impl IndexWorker {
    /// Create a worker.
    pub fn new(
        id: usize,
        queue: Arc<FileQueue>,
        index: Arc<InvertedIndex>,
        tokenizer: Arc<dyn Tokenizer>,
        shutdown: ShutdownHandle,
    ) -> Self {
        Self {
            id,
            queue,
            index,
            tokenizer,
            shutdown,
        }
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Index one file. Returns the number of tokens it contained.
    ///
    /// The file is tallied completely before the first merge, so a read
    /// failure leaves the index untouched.
    pub fn process(&self, path: &Path) -> Result<u64> {
        let content = fs::read_to_string(path).map_err(|e| IndexError::file_read(path, e))?;
        let tally = tally_terms(self.tokenizer.as_ref(), &content);

        let mut tokens = 0;
        for (term, count) in &tally {
            self.index.merge(term, path, *count);
            tokens += count;
        }

        debug!(
            "worker {}: indexed {} ({} tokens, {} terms)",
            self.id,
            path.display(),
            tokens,
            tally.len()
        );
        Ok(tokens)
    }

    /// Process paths until the queue reports end-of-stream.
    ///
    /// After shutdown is requested, remaining paths are drained and recorded as
    /// skipped instead of processed, which keeps the producer from blocking.
    pub fn run(self) -> WorkerOutcome {
        let _drain = DrainOnPanic {
            worker_id: self.id,
            queue: &self.queue,
        };
        let mut outcome = WorkerOutcome {
            worker_id: self.id,
            ..Default::default()
        };

        while let Some(path) = self.queue.dequeue() {
            if self.shutdown.is_requested() {
                outcome.skipped.push(path);
                continue;
            }

            match self.process(&path) {
                Ok(tokens) => {
                    outcome.files_indexed += 1;
                    outcome.tokens += tokens;
                }
                Err(e) => {
                    warn!("worker {}: {e}", self.id);
                    outcome.failures.push(e);
                }
            }
        }

        debug!(
            "worker {} finished: {} indexed, {} failed, {} skipped",
            self.id,
            outcome.files_indexed,
            outcome.failures.len(),
            outcome.skipped.len()
        );
        outcome
    }

    /// Run the worker on its own thread.
    pub fn spawn(self) -> Result<WorkerHandle> {
        let id = self.id;

        let handle = thread::Builder::new()
            .name(format!("wordindex-worker-{id}"))
            .spawn(move || self.run())
            .map_err(|e| IndexError::thread_join(format!("failed to spawn worker {id}: {e}")))?;

        Ok(WorkerHandle {
            id,
            handle: Some(handle),
        })
    }
}

/// A running worker thread.
pub struct WorkerHandle {
    id: usize,
    handle: Option<JoinHandle<WorkerOutcome>>,
}

impl WorkerHandle {
    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<WorkerOutcome> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| IndexError::thread_join(format!("worker {} panicked", self.id))),
            None => Ok(WorkerOutcome {
                worker_id: self.id,
                ..Default::default()
            }),
        }
    }
}
