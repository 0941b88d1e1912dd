use serde::{Deserialize, Serialize};

/// What happened to one dataset during a bulk load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    /// Already in the store, nothing fetched
    Cached,
    /// Fetched and saved
    Loaded { rows: usize },
    /// Not attempted
    Skipped,
    /// Fetch or save failed; siblings were still processed
    Failed(String),
}

impl LoadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LoadOutcome::Failed(_))
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Cached => write!(f, "already in store"),
            LoadOutcome::Loaded { rows } => write!(f, "loaded {} rows", rows),
            LoadOutcome::Skipped => write!(f, "skipped"),
            LoadOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-ticker outcomes of a bulk load, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub symbol: String,
    entries: Vec<(String, LoadOutcome)>,
}

impl LoadReport {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, ticker: impl Into<String>, outcome: LoadOutcome) {
        self.entries.push((ticker.into(), outcome));
    }

    pub fn entries(&self) -> &[(String, LoadOutcome)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn outcome_of(&self, ticker: &str) -> Option<&LoadOutcome> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, outcome)| outcome)
    }

    /// Number of datasets fetched from the source
    pub fn fetched(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, LoadOutcome::Loaded { .. }))
            .count()
    }

    /// Tickers that failed, with the reason
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(ticker, outcome)| match outcome {
                LoadOutcome::Failed(reason) => Some((ticker.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        !self.entries.iter().any(|(_, outcome)| outcome.is_failure())
    }
}
