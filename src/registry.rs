//! Tool capability contract and the fixture-backed registry

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeReportEntry {
    pub signature: String,
    pub hours: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Domain operations the JSON-RPC dispatcher can invoke.
///
/// Implementations are read-only after construction and shared across
/// request tasks.
pub trait ToolCapabilities: Send + Sync {
    /// Entries reported for the given period. Unknown periods yield an empty list.
    fn time_report(&self, year: i32, month: i32) -> Vec<TimeReportEntry>;

    /// Case-insensitive substring search. A blank query yields an empty list.
    fn search(&self, query: &str) -> Vec<SearchResult>;

    /// `None` when no result carries `id`.
    fn fetch(&self, id: &str) -> Option<SearchResult>;
}

/// Fixed in-memory data backing the three tools.
#[derive(Debug, Clone)]
pub struct FixtureRegistry {
    reports: HashMap<(i32, i32), Vec<TimeReportEntry>>,
    corpus: Vec<SearchResult>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        let reports = HashMap::from([(
            (2025, 5),
            vec![TimeReportEntry {
                signature: "NH".to_string(),
                hours: 80,
            }],
        )]);

        let corpus = vec![SearchResult {
            id: "1".to_string(),
            title: "Time Report Overview".to_string(),
            text: "Overview of the TimeReport MCP demo.".to_string(),
            url: None,
            metadata: None,
        }];

        Self { reports, corpus }
    }
}

impl Default for FixtureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolCapabilities for FixtureRegistry {
    fn time_report(&self, year: i32, month: i32) -> Vec<TimeReportEntry> {
        self.reports
            .get(&(year, month))
            .cloned()
            .unwrap_or_default()
    }

    fn search(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.corpus
            .iter()
            .filter(|result| {
                result.title.to_lowercase().contains(&needle)
                    || result.text.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    fn fetch(&self, id: &str) -> Option<SearchResult> {
        self.corpus.iter().find(|result| result.id == id).cloned()
    }
}
