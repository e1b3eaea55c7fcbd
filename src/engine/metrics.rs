//! Engine run metrics.
//!
//! Timings are collected per phase of a search. They are cheap (a handful of
//! `Instant::now` calls) and are surfaced through
//! [`search_verbose_with`](crate::search_verbose_with) and the CLI report.

use super::facets::FacetOptions;
use crate::Record;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Language + text gates.
    pub prefilter: Duration,
    /// Tag gates (author phase included).
    pub filter: Duration,
    pub rank: Duration,
    pub facets: Duration,
    /// Records left after the language and text gates.
    pub candidates: usize,
    /// Records left after every gate.
    pub matched: usize,
    /// Whether the author OR-gate ran as its own phase.
    pub author_gate: bool,
}

/// Engine output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult<'s> {
    /// Matching records, ranked.
    pub records: Vec<&'s Record>,
    pub facets: FacetOptions,
    pub metrics: RunMetrics,
}
