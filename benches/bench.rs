//! Criterion benchmarks for wordindex.
//!
//! Covers tokenization and full directory builds at several worker counts.

use std::fs;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tempfile::TempDir;
use wordindex::analysis::tokenizer::WhitespaceTokenizer;
use wordindex::pipeline::worker::tally_terms;
use wordindex::pipeline::{BuildConfig, WorkerPool};

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "search", "engine", "full", "text", "index", "query", "document", "field", "term",
        "phrase", "boolean", "vector", "similarity", "relevance", "score", "analysis",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 500 + (i % 100); // Variable length documents
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            doc_words.push(words[word_idx]);
            if j % 12 == 11 {
                doc_words.push("\n");
            }
        }

        documents.push(doc_words.join(" "));
    }

    documents
}

fn write_corpus(count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (i, doc) in generate_test_documents(count).iter().enumerate() {
        fs::write(dir.path().join(format!("doc-{i:04}.txt")), doc).unwrap();
    }
    dir
}

/// Benchmark local term tallying.
fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally");
    let tokenizer = WhitespaceTokenizer::new();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("tally_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(tally_terms(&tokenizer, black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark whole builds.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    let files = 200;
    let corpus = write_corpus(files);
    group.throughput(Throughput::Elements(files as u64));

    for workers in [1, 3, 8] {
        let pool = WorkerPool::new(BuildConfig::new().with_worker_count(workers)).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &pool, |b, pool| {
            b.iter(|| black_box(pool.build(corpus.path()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tally, bench_build);
criterion_main!(benches);
