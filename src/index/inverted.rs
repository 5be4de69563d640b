//! Thread-safe in-memory inverted index.
//!
//! Terms are spread over a fixed number of shards, each guarded by its own
//! [`parking_lot::RwLock`]. A term always hashes to the same shard, and a merge
//! holds that shard's write lock for the whole read-modify-write, so merges
//! for the same term are linearizable while merges for terms in different
//! shards proceed in parallel.
//!
//! Only the indexing pipeline can mutate an index. A [`InvertedIndex`] handed
//! out by a build is read-only.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::{AHashMap, RandomState};
use parking_lot::RwLock;

use crate::index::stat::{DocumentStat, StatList};

/// Default number of lock shards.
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Mapping from term to the documents containing it.
#[derive(Debug)]
pub struct InvertedIndex {
    shards: Box<[RwLock<AHashMap<String, StatList>>]>,
    hasher: RandomState,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create an empty index with [`DEFAULT_SHARD_COUNT`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create an empty index with `shard_count` shards (at least one).
    pub fn with_shards(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(AHashMap::new()))
            .collect();

        InvertedIndex {
            shards,
            hasher: RandomState::new(),
        }
    }

    fn shard(&self, term: &str) -> &RwLock<AHashMap<String, StatList>> {
        let slot = self.hasher.hash_one(term) as usize % self.shards.len();
        &self.shards[slot]
    }

    /// Atomically add `count` occurrences of `term` in `file_path`.
    ///
    /// Creates the record when the term has never been seen in that file,
    /// otherwise adds to the existing count. A zero count is a no-op.
    pub(crate) fn merge(&self, term: &str, file_path: &Path, count: u64) {
        if count == 0 {
            return;
        }

        let mut shard = self.shard(term).write();
        match shard.get_mut(term) {
            Some(list) => list.add(file_path, count),
            None => {
                let mut list = StatList::default();
                list.add(file_path, count);
                shard.insert(term.to_string(), list);
            }
        }
    }

    /// Records for `term`, sorted by file path. Empty if the term is unknown.
    ///
    /// The returned vector is a copy; the index is never exposed directly.
    pub fn lookup(&self, term: &str) -> Vec<DocumentStat> {
        self.shard(term)
            .read()
            .get(term)
            .map(|list| list.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// The record with the highest count for `term`.
    ///
    /// Ties go to the record that comes first in [`lookup`](Self::lookup)
    /// order, i.e. the smallest file path. `None` if the term is unknown.
    pub fn most_relevant(&self, term: &str) -> Option<DocumentStat> {
        self.shard(term)
            .read()
            .get(term)
            .and_then(|list| list.most_relevant().cloned())
    }

    /// Whether `term` occurs in any document.
    pub fn contains(&self, term: &str) -> bool {
        self.shard(term).read().contains_key(term)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.shard(term)
            .read()
            .get(term)
            .map_or(0, |list| list.len())
    }

    /// Total occurrences of `term` across all documents.
    pub fn total_count(&self, term: &str) -> u64 {
        self.shard(term)
            .read()
            .get(term)
            .map_or(0, |list| list.total_count())
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Whether the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// All terms, sorted.
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self
            .shards
            .iter()
            .flat_map(|shard| shard.read().keys().cloned().collect::<Vec<_>>())
            .collect();
        terms.sort_unstable();
        terms
    }

    /// A sorted copy of the whole index.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<DocumentStat>> {
        let mut snapshot = BTreeMap::new();
        for shard in self.shards.iter() {
            let shard = shard.read();
            for (term, list) in shard.iter() {
                snapshot.insert(term.clone(), list.as_slice().to_vec());
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_index() {
        let index = InvertedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.term_count(), 0);
        assert!(index.lookup("cat").is_empty());
        assert_eq!(index.most_relevant("cat"), None);
        assert!(!index.contains("cat"));
    }

    #[test]
    fn test_merge_and_lookup() {
        let index = InvertedIndex::new();
        index.merge("cat", Path::new("b.txt"), 1);
        index.merge("cat", Path::new("a.txt"), 2);
        index.merge("dog", Path::new("b.txt"), 2);
        index.merge("cat", Path::new("a.txt"), 1);

        assert_eq!(
            index.lookup("cat"),
            vec![DocumentStat::new("a.txt", 3), DocumentStat::new("b.txt", 1)]
        );
        assert_eq!(index.document_frequency("cat"), 2);
        assert_eq!(index.total_count("cat"), 4);
        assert_eq!(index.most_relevant("dog"), Some(DocumentStat::new("b.txt", 2)));
        assert_eq!(index.terms(), vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_zero_count_is_ignored() {
        let index = InvertedIndex::new();
        index.merge("cat", Path::new("a.txt"), 0);
        assert!(!index.contains("cat"));
    }

    #[test]
    fn test_lookup_returns_copy() {
        let index = InvertedIndex::new();
        index.merge("cat", Path::new("a.txt"), 1);

        let mut stats = index.lookup("cat");
        stats[0].count = 100;
        stats.clear();

        assert_eq!(index.lookup("cat"), vec![DocumentStat::new("a.txt", 1)]);
    }

    #[test]
    fn test_single_shard_behaves_the_same() {
        let index = InvertedIndex::with_shards(0);
        index.merge("a", Path::new("x"), 1);
        index.merge("b", Path::new("x"), 2);
        assert_eq!(index.term_count(), 2);
        assert_eq!(index.snapshot().len(), 2);
    }

    #[test]
    fn test_concurrent_merges_do_not_lose_updates() {
        let index = Arc::new(InvertedIndex::with_shards(4));
        let threads = 8;
        let rounds = 500;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    let own = format!("file-{t}.txt");
                    for _ in 0..rounds {
                        // Every thread hits the same term and the same shared file.
                        index.merge("shared", Path::new("common.txt"), 1);
                        index.merge("shared", Path::new(&own), 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = index.lookup("shared");
        assert_eq!(stats.len(), threads + 1);
        assert_eq!(
            stats.iter().find(|s| s.file_path == Path::new("common.txt")).unwrap().count,
            (threads * rounds) as u64
        );
        for t in 0..threads {
            let own = format!("file-{t}.txt");
            let stat = stats.iter().find(|s| s.file_path == Path::new(&own)).unwrap();
            assert_eq!(stat.count, (rounds * 2) as u64);
        }
    }
}
