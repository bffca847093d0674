//! Per-request outcomes and run summary.

use std::fmt;

use crate::fetcher::{FetchError, Fetched};

/// Outcome of one request, in manifest order.
#[derive(Debug)]
pub struct RequestOutcome {
    pub url: String,
    pub result: Result<Fetched, FetchError>,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RequestOutcome>,
}

/// Aggregate counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        let mut s = BatchSummary::default();
        for o in &self.outcomes {
            match &o.result {
                Ok(Fetched::Downloaded { .. }) => s.downloaded += 1,
                Ok(Fetched::Skipped { .. }) => s.skipped += 1,
                Err(e) if e.is_cancelled() => s.cancelled += 1,
                Err(_) => s.failed += 1,
            }
        }
        s
    }

    /// True when no request failed or was cancelled.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} skipped, {} failed",
            self.downloaded, self.skipped, self.failed
        )?;
        if self.cancelled > 0 {
            write!(f, ", {} cancelled", self.cancelled)?;
        }
        Ok(())
    }
}
