//! Command line argument parsing for the wordindex CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::pipeline::config::{BuildConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};

/// wordindex - count words across a directory of text files
#[derive(Parser, Debug, Clone)]
#[command(name = "wordindex")]
#[command(about = "Build an in-memory inverted index over a directory of text files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WordIndexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WordIndexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every document containing each term, with counts
    Lookup(QueryArgs),

    /// Show the document with the most occurrences of each term
    Top(QueryArgs),

    /// Show build statistics
    Stats(StatsArgs),

    /// Print the whole index, sorted by term
    Dump(DumpArgs),
}

/// Options controlling how the index is built
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Directory whose files are indexed (not recursive)
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of index workers
    #[arg(short, long, env = "WORDINDEX_WORKERS", default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Capacity of the queue between the directory scanner and the workers
    #[arg(long, env = "WORDINDEX_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Only index files with this extension, e.g. "txt"
    #[arg(short, long)]
    pub extension: Option<String>,
}

impl BuildArgs {
    /// Translate the flags into a build configuration.
    pub fn to_config(&self) -> BuildConfig {
        let config = BuildConfig::new()
            .with_worker_count(self.workers)
            .with_queue_capacity(self.queue_capacity);

        match &self.extension {
            Some(extension) => config.with_extension(extension.as_str()),
            None => config,
        }
    }
}

/// Arguments for term queries
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Terms to look up (case-sensitive, matched exactly)
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub terms: Vec<String>,
}

/// Arguments for build statistics
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub build: BuildArgs,
}

/// Arguments for dumping the index
#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Maximum number of terms to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats supported by the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = WordIndexArgs::try_parse_from(["wordindex", "stats", "docs"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = WordIndexArgs::try_parse_from(["wordindex", "-vv", "stats", "docs"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            WordIndexArgs::try_parse_from(["wordindex", "--quiet", "-v", "stats", "docs"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            WordIndexArgs::try_parse_from(["wordindex", "--format", "json", "stats", "docs"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_lookup_args() {
        let args = WordIndexArgs::try_parse_from([
            "wordindex",
            "lookup",
            "docs",
            "cat",
            "dog",
            "--workers",
            "8",
            "--queue-capacity",
            "4",
            "-e",
            "txt",
        ])
        .unwrap();

        if let Command::Lookup(query) = args.command {
            assert_eq!(query.build.dir, PathBuf::from("docs"));
            assert_eq!(query.terms, vec!["cat", "dog"]);

            let config = query.build.to_config();
            assert_eq!(config.worker_count, 8);
            assert_eq!(config.queue_capacity, 4);
            assert_eq!(config.extension.as_deref(), Some("txt"));
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_lookup_requires_terms() {
        assert!(WordIndexArgs::try_parse_from(["wordindex", "lookup", "docs"]).is_err());
    }

    #[test]
    fn test_dump_limit() {
        let args =
            WordIndexArgs::try_parse_from(["wordindex", "dump", "docs", "--limit", "10"]).unwrap();
        if let Command::Dump(dump) = args.command {
            assert_eq!(dump.limit, Some(10));
            assert_eq!(dump.build.workers, DEFAULT_WORKER_COUNT);
        } else {
            panic!("Expected Dump command");
        }
    }
}
