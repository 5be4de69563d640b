//! Command implementations for the wordindex CLI.

use log::warn;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::pipeline::pool::{BuildReport, WorkerPool};

/// Execute a CLI command.
pub fn execute_command(args: WordIndexArgs) -> Result<()> {
    match &args.command {
        Command::Lookup(query_args) => lookup_terms(query_args, &args),
        Command::Top(query_args) => top_documents(query_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
        Command::Dump(dump_args) => dump_index(dump_args, &args),
    }
}

/// Build the index described by `build_args`.
///
/// Files that could not be read are logged here and listed again in the
/// command output; the command still prints results for everything that was
/// indexed.
fn build_index(build_args: &BuildArgs) -> Result<BuildReport> {
    let pool = WorkerPool::new(build_args.to_config())?;
    let report = pool.build(&build_args.dir)?;

    for failure in &report.failures {
        warn!("{failure}");
    }

    Ok(report)
}

fn failure_messages(report: &BuildReport) -> Vec<String> {
    report.failures.iter().map(|e| e.to_string()).collect()
}

/// List the documents of each term.
fn lookup_terms(args: &QueryArgs, cli_args: &WordIndexArgs) -> Result<()> {
    let report = build_index(&args.build)?;

    let results = args
        .terms
        .iter()
        .map(|term| TermLookup {
            term: term.clone(),
            documents: report.index.lookup(term),
        })
        .collect();

    let failures = failure_messages(&report);
    output_result(&LookupResults { results, failures }, cli_args)
}

/// Show the most relevant document of each term.
fn top_documents(args: &QueryArgs, cli_args: &WordIndexArgs) -> Result<()> {
    let report = build_index(&args.build)?;

    let results = args
        .terms
        .iter()
        .map(|term| TopDocument {
            term: term.clone(),
            document: report.index.most_relevant(term),
        })
        .collect();

    let failures = failure_messages(&report);
    output_result(&TopResults { results, failures }, cli_args)
}

/// Show build statistics.
fn show_stats(args: &StatsArgs, cli_args: &WordIndexArgs) -> Result<()> {
    let report = build_index(&args.build)?;

    let summary = BuildSummary {
        directory: args.build.dir.display().to_string(),
        config: args.build.to_config(),
        files_discovered: report.files_discovered,
        files_indexed: report.files_indexed,
        files_failed: report.failures.len(),
        files_skipped: report.skipped.len(),
        distinct_terms: report.index.term_count(),
        tokens_indexed: report.tokens_indexed,
        duration_ms: report.execution_time.as_millis() as u64,
        failures: failure_messages(&report),
    };

    output_result(&summary, cli_args)
}

/// Print the whole index.
fn dump_index(args: &DumpArgs, cli_args: &WordIndexArgs) -> Result<()> {
    let report = build_index(&args.build)?;

    let failures = failure_messages(&report);
    let mut terms = report.index.snapshot();
    if let Some(limit) = args.limit {
        terms = terms.into_iter().take(limit).collect();
    }

    output_result(&IndexDump { terms, failures }, cli_args)
}
