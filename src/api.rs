use crate::engine::{self, FacetOptions, FacetScope};
use crate::{FilterState, Language, Record, RecordStore, SessionConfig};
use std::time::Duration;

/// Options that affect a search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Which records feed the facet option lists.
    pub facet_scope: FacetScope,
}

impl From<&SessionConfig> for Options {
    fn from(config: &SessionConfig) -> Self {
        Self { facet_scope: config.facet_scope }
    }
}

/// Result from [`search`] and [`search_with`].
///
/// Records borrow from the store; the facet lists are owned.
#[derive(Debug, Clone)]
pub struct SearchResult<'s> {
    /// Matching records, strongest match first.
    pub records: Vec<&'s Record>,
    /// Selectable options per axis for the tag rail.
    pub facets: FacetOptions,
    /// Number of matching records.
    pub total: usize,
    /// Total elapsed time spent filtering, ranking and building facets.
    pub elapsed: Duration,
}

/// Per-phase details returned by [`search_verbose_with`].
#[derive(Debug, Clone)]
pub struct SearchDetails {
    pub total: Duration,
    /// Language and text gates.
    pub prefilter: Duration,
    /// Tag gates.
    pub filter: Duration,
    pub rank: Duration,
    pub facets: Duration,
    /// Records of the active language that passed the text gate.
    pub candidates: usize,
    /// The author selection ran as a separate OR phase.
    pub author_gate: bool,
}

/// Result from [`search_verbose_with`].
#[derive(Debug, Clone)]
pub struct SearchResultVerbose<'s> {
    pub records: Vec<&'s Record>,
    pub facets: FacetOptions,
    pub total: usize,
    pub elapsed: Duration,
    pub details: SearchDetails,
}

/// Search `store` under `state` with default [`Options`].
///
/// # Example
/// ```
/// use excerpta::{FilterState, Language, RecordStore, search};
///
/// let store = RecordStore::new(Vec::new());
/// let out = search(&store, &FilterState::new(), Language::Primary);
/// assert_eq!(out.total, 0);
/// ```
pub fn search<'s>(store: &'s RecordStore, state: &FilterState, language: Language) -> SearchResult<'s> {
    search_with(store, state, language, &Options::default())
}

/// Search `store` under `state` with the provided `options`.
pub fn search_with<'s>(
    store: &'s RecordStore,
    state: &FilterState,
    language: Language,
    options: &Options,
) -> SearchResult<'s> {
    let run = engine::run(store, state, language, options.facet_scope);
    SearchResult { total: run.records.len(), records: run.records, facets: run.facets, elapsed: run.metrics.total }
}

/// Like [`search_with`], plus per-phase timings and counts.
pub fn search_verbose_with<'s>(
    store: &'s RecordStore,
    state: &FilterState,
    language: Language,
    options: &Options,
) -> SearchResultVerbose<'s> {
    let run = engine::run(store, state, language, options.facet_scope);
    let m = run.metrics;
    let details = SearchDetails {
        total: m.total,
        prefilter: m.prefilter,
        filter: m.filter,
        rank: m.rank,
        facets: m.facets,
        candidates: m.candidates,
        author_gate: m.author_gate,
    };

    SearchResultVerbose { total: m.matched, records: run.records, facets: run.facets, elapsed: m.total, details }
}
