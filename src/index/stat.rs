//! Per-document occurrence records.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How often one term occurs in one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentStat {
    /// Path of the source document.
    pub file_path: PathBuf,
    /// Number of occurrences of the term in that document.
    pub count: u64,
}

impl DocumentStat {
    /// Create a new record.
    pub fn new<P: Into<PathBuf>>(file_path: P, count: u64) -> Self {
        DocumentStat {
            file_path: file_path.into(),
            count,
        }
    }

    /// Get the document path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Get the occurrence count.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl fmt::Display for DocumentStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{count={}, filePath='{}'}}",
            self.count,
            self.file_path.display()
        )
    }
}

/// The records of a single term, at most one per file, sorted by path.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatList {
    stats: Vec<DocumentStat>,
}

impl StatList {
    /// Add `count` occurrences in `file_path`, creating the record if needed.
    pub(crate) fn add(&mut self, file_path: &Path, count: u64) {
        match self
            .stats
            .binary_search_by(|s| s.file_path.as_path().cmp(file_path))
        {
            Ok(pos) => self.stats[pos].count += count,
            Err(pos) => self.stats.insert(pos, DocumentStat::new(file_path, count)),
        }
    }

    pub(crate) fn as_slice(&self) -> &[DocumentStat] {
        &self.stats
    }

    pub(crate) fn len(&self) -> usize {
        self.stats.len()
    }

    /// Record with the highest count; ties go to the earliest record.
    pub(crate) fn most_relevant(&self) -> Option<&DocumentStat> {
        self.stats.iter().fold(None, |best, stat| match best {
            Some(b) if b.count >= stat.count => Some(b),
            _ => Some(stat),
        })
    }

    pub(crate) fn total_count(&self) -> u64 {
        self.stats.iter().map(|s| s.count).sum()
    }
}
