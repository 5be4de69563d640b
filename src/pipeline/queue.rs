//! Bounded, blocking, closable queue of file paths.
//!
//! One producer (the directory scanner) feeds paths to any number of
//! consumers (the index workers). When the queue is full, `enqueue` blocks the
//! producer until a worker makes room, so memory stays bounded no matter how
//! many files the directory holds. Closing the queue drops its only sender;
//! consumers then drain what is left and observe end-of-stream.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use parking_lot::Mutex;

use crate::error::{IndexError, Result};

/// Statistics for the file queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total paths enqueued
    pub enqueued: AtomicU64,

    /// Total paths dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Number of paths handed to the queue.
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Number of paths delivered to consumers.
    pub fn dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Bounded FIFO channel of file paths.
#[derive(Debug)]
pub struct FileQueue {
    /// `None` once the queue is closed.
    sender: Mutex<Option<Sender<PathBuf>>>,

    receiver: Receiver<PathBuf>,

    capacity: usize,

    stats: QueueStats,
}

impl FileQueue {
    /// Create a queue holding at most `capacity` paths (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);

        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
            capacity,
            stats: QueueStats::default(),
        }
    }

    /// Add a path, blocking while the queue is full.
    ///
    /// Never drops a path. Fails with [`IndexError::QueueClosed`] only when the
    /// queue was closed before the call.
    pub fn enqueue<P: Into<PathBuf>>(&self, path: P) -> Result<()> {
        // Clone the sender so the lock is not held while blocked on a full queue.
        let sender = self.sender.lock().clone().ok_or(IndexError::QueueClosed)?;

        // The queue owns a receiver, so the channel cannot be disconnected here.
        sender
            .send(path.into())
            .map_err(|_| IndexError::QueueClosed)?;
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Take the next path, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub fn dequeue(&self) -> Option<PathBuf> {
        match self.receiver.recv() {
            Ok(path) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(path)
            }
            Err(_) => None,
        }
    }

    /// Signal that no more paths will be enqueued. Idempotent.
    pub fn close(&self) {
        if self.sender.lock().take().is_some() {
            debug!("file queue closed after {} paths", self.stats.enqueued());
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}
