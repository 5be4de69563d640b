//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::args::{OutputFormat, WordIndexArgs};
use crate::error::Result;
use crate::index::DocumentStat;
use crate::pipeline::config::BuildConfig;

/// Results that can be printed for people as well as serialized.
pub trait HumanReadable {
    /// Render as plain text, one line per entry.
    fn to_human(&self) -> String;
}

/// Documents containing one term.
#[derive(Debug, Serialize)]
pub struct TermLookup {
    pub term: String,
    pub documents: Vec<DocumentStat>,
}

/// Result structure for the lookup command.
#[derive(Debug, Serialize)]
pub struct LookupResults {
    pub results: Vec<TermLookup>,
    pub failures: Vec<String>,
}

impl HumanReadable for LookupResults {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for lookup in &self.results {
            out.push_str(&format!("{}:\n", lookup.term));
            if lookup.documents.is_empty() {
                out.push_str("  (no documents)\n");
            }
            for stat in &lookup.documents {
                out.push_str(&format!("  {stat}\n"));
            }
        }
        out.push_str(&render_failures(&self.failures));
        out
    }
}

/// The best document for one term.
#[derive(Debug, Serialize)]
pub struct TopDocument {
    pub term: String,
    pub document: Option<DocumentStat>,
}

/// Result structure for the top command.
#[derive(Debug, Serialize)]
pub struct TopResults {
    pub results: Vec<TopDocument>,
    pub failures: Vec<String>,
}

impl HumanReadable for TopResults {
    fn to_human(&self) -> String {
        let mut out: String = self
            .results
            .iter()
            .map(|top| match &top.document {
                Some(stat) => format!("{}: {stat}\n", top.term),
                None => format!("{}: (not found)\n", top.term),
            })
            .collect();
        out.push_str(&render_failures(&self.failures));
        out
    }
}

/// Build statistics.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub directory: String,
    pub config: BuildConfig,
    pub files_discovered: usize,
    pub files_indexed: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub distinct_terms: usize,
    pub tokens_indexed: u64,
    pub duration_ms: u64,
    pub failures: Vec<String>,
}

impl HumanReadable for BuildSummary {
    fn to_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Build Statistics:\n");
        out.push_str("═════════════════\n");
        out.push_str(&format!("Directory: {}\n", self.directory));
        out.push_str(&format!(
            "Workers: {} (queue capacity {})\n",
            self.config.worker_count, self.config.queue_capacity
        ));
        out.push_str(&format!("Files discovered: {}\n", self.files_discovered));
        out.push_str(&format!("Files indexed: {}\n", self.files_indexed));
        out.push_str(&format!("Files failed: {}\n", self.files_failed));
        if self.files_skipped > 0 {
            out.push_str(&format!("Files skipped: {}\n", self.files_skipped));
        }
        out.push_str(&format!("Distinct terms: {}\n", self.distinct_terms));
        out.push_str(&format!("Tokens indexed: {}\n", self.tokens_indexed));
        out.push_str(&format!("Build time: {}ms\n", self.duration_ms));

        out.push_str(&render_failures(&self.failures));
        out
    }
}

/// The whole index, sorted by term.
#[derive(Debug, Serialize)]
pub struct IndexDump {
    pub terms: BTreeMap<String, Vec<DocumentStat>>,
    pub failures: Vec<String>,
}

impl HumanReadable for IndexDump {
    fn to_human(&self) -> String {
        let mut out: String = self
            .terms
            .iter()
            .map(|(term, stats)| {
                let stats: Vec<String> = stats.iter().map(|s| s.to_string()).collect();
                format!("{term}: {}\n", stats.join(", "))
            })
            .collect();
        out.push_str(&render_failures(&self.failures));
        out
    }
}

/// Files that could not be indexed, as a trailing section. Empty if none.
fn render_failures(failures: &[String]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nFailures:\n");
    for failure in failures {
        out.push_str(&format!("  {failure}\n"));
    }
    out
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(result: &T, args: &WordIndexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", result.to_human());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &WordIndexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_human() {
        let results = LookupResults {
            results: vec![
                TermLookup {
                    term: "cat".to_string(),
                    documents: vec![DocumentStat::new("a.txt", 2), DocumentStat::new("b.txt", 1)],
                },
                TermLookup {
                    term: "owl".to_string(),
                    documents: Vec::new(),
                },
            ],
            failures: Vec::new(),
        };

        assert_eq!(
            results.to_human(),
            "cat:\n  {count=2, filePath='a.txt'}\n  {count=1, filePath='b.txt'}\nowl:\n  (no documents)\n"
        );
    }

    #[test]
    fn test_top_human() {
        let results = TopResults {
            results: vec![
                TopDocument {
                    term: "dog".to_string(),
                    document: Some(DocumentStat::new("b.txt", 2)),
                },
                TopDocument {
                    term: "owl".to_string(),
                    document: None,
                },
            ],
            failures: Vec::new(),
        };

        assert_eq!(
            results.to_human(),
            "dog: {count=2, filePath='b.txt'}\nowl: (not found)\n"
        );
    }

    #[test]
    fn test_dump_json() {
        let mut terms = BTreeMap::new();
        terms.insert("cat".to_string(), vec![DocumentStat::new("a.txt", 2)]);
        let json = serde_json::to_string(&IndexDump {
            terms,
            failures: Vec::new(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"terms":{"cat":[{"file_path":"a.txt","count":2}],"failures":[]}}"#
        );
    }

    #[test]
    fn test_failures_are_listed() {
        let failure = "Cannot read file bad.txt: stream did not contain valid UTF-8".to_string();
        let results = TopResults {
            results: vec![TopDocument {
                term: "cat".to_string(),
                document: Some(DocumentStat::new("a.txt", 1)),
            }],
            failures: vec![failure.clone()],
        };

        assert_eq!(
            results.to_human(),
            format!("cat: {{count=1, filePath='a.txt'}}\n\nFailures:\n  {failure}\n")
        );

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["failures"][0], failure.as_str());

        let lookup = LookupResults {
            results: Vec::new(),
            failures: vec![failure.clone()],
        };
        assert!(lookup.to_human().contains(&failure));
    }
}
