use std::fmt;
use thiserror::Error;

/// One of the page's data sources failed; the whole page load fails with it.
#[derive(Debug)]
pub struct AggregationError {
    pub source_name: &'static str,
    pub error: anyhow::Error,
}

impl AggregationError {
    pub fn new(source_name: &'static str, error: anyhow::Error) -> Self {
        Self { source_name, error }
    }
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page data aggregation failed (source={}): {:#}",
            self.source_name, self.error
        )
    }
}

impl std::error::Error for AggregationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

/// Errors emitted by the team resolver.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TeamError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Errors emitted while building the index page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PageError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    Team(#[from] TeamError),
}
