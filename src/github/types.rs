use serde::Deserialize;

/// One entry of `gh pr list --json url`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestRef {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Opened(String),
    AlreadyOpen(String),
    Failed(String),
}

impl DispatchOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Opened(url) | DispatchOutcome::AlreadyOpen(url) => Some(url.as_str()),
            DispatchOutcome::Failed(_) => None,
        }
    }
}

/// Outcome per base branch, in configuration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub results: Vec<(String, DispatchOutcome)>,
}

impl DispatchReport {
    pub fn failed(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, outcome)| matches!(outcome, DispatchOutcome::Failed(_)))
            .map(|(base, _)| base.as_str())
            .collect()
    }

    pub fn urls(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|(_, outcome)| outcome.url())
            .collect()
    }
}
