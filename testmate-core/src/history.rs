//! Generation history as an explicit repository interface.
//!
//! History is a cache, not a source of truth: records are append-only and
//! listed most-recent-first. Callers inject a repository implementation
//! rather than reaching for a module-level singleton.

use crate::case::TestCaseSet;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// One completed generation, as remembered by the history.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    /// The requirement that was submitted.
    pub requirement: String,
    /// Engine label that served the request (possibly a fallback label).
    pub engine: String,
    /// When the generation completed.
    pub created_at: DateTime<Utc>,
    /// The resulting test-case set.
    pub test_cases: TestCaseSet,
}

impl GenerationRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        requirement: impl Into<String>,
        engine: impl Into<String>,
        test_cases: TestCaseSet,
    ) -> Self {
        Self {
            requirement: requirement.into(),
            engine: engine.into(),
            created_at: Utc::now(),
            test_cases,
        }
    }
}

/// Append-only store of past generations.
pub trait HistoryRepository: Send + Sync {
    /// Save a completed generation.
    fn save(&self, record: GenerationRecord);

    /// List saved generations, most recent first.
    fn list(&self) -> Vec<GenerationRecord>;
}

/// Default in-memory history.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: RwLock<Vec<GenerationRecord>>,
}

impl InMemoryHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl HistoryRepository for InMemoryHistory {
    fn save(&self, record: GenerationRecord) {
        self.records.write().push(record);
    }

    fn list(&self) -> Vec<GenerationRecord> {
        let records = self.records.read();
        records.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_lists_most_recent_first() {
        let history = InMemoryHistory::new();
        history.save(GenerationRecord::new("first", "gemini", TestCaseSet::new()));
        history.save(GenerationRecord::new("second", "groq", TestCaseSet::new()));

        let records = history.list();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].requirement, "second");
        assert_eq!(records[1].requirement, "first");
    }

    #[test]
    fn history_starts_empty() {
        let history = InMemoryHistory::new();
        assert!(history.is_empty());
        assert!(history.list().is_empty());
    }
}
