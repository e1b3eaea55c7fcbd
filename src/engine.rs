//! Filtering, ranking and facet engine.
//!
//! A search over the corpus is a short pipeline:
//!
//! ```text
//! FilterState ── CompiledFilter::new          (compiled_filter.rs)
//!                   - folded needle, active axes
//!                           │
//! records ── prefilter ─────┤ language gate + text gate   (predicate.rs)
//!                           │
//!                           ├─ author selected?  author OR-gate, then AND the rest
//!                           └─ otherwise         uniform AND across axes
//!                           │
//!                           v
//!                  rank (stable, strength desc)           (rank.rs)
//!                           │
//!                           v
//!                  paginate                               (rank.rs)
//!
//! records ── language + text only ── build_options        (facets.rs)
//! ```
//!
//! Facet options ignore tag selections unless the contextual scope is chosen
//! (see `facets.rs`), so the tag rail never shrinks because of a click inside it.
//!
//! ## Responsibilities by module
//!
//! - `compiled_filter.rs`: per-state precomputation shared by every record test.
//! - `predicate.rs`: `matches`, `match_strength` and the two-phase filter.
//! - `facets.rs`: selectable options per axis, label resolution and ordering.
//! - `rank.rs`: stable ordering by match-strength and paging.
//! - `metrics.rs`: optional timing data for a run.

#[path = "engine/compiled_filter.rs"]
mod compiled_filter;
#[path = "engine/facets.rs"]
mod facets;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/predicate.rs"]
mod predicate;
#[path = "engine/rank.rs"]
mod rank;


pub use compiled_filter::CompiledFilter;
pub use facets::{FacetOption, FacetOptions, FacetScope, build_options};
pub(crate) use metrics::{RunMetrics, RunResult};
pub use predicate::{match_strength, matches};
pub(crate) use predicate::{filter_records, prefilter};
pub use rank::{Page, paginate, rank};

use crate::{FilterState, Language, RecordStore};
use std::time::Instant;
use tracing::debug;

/// Run the full pipeline once and collect timings.
pub(crate) fn run<'s>(
    store: &'s RecordStore,
    state: &FilterState,
    language: Language,
    scope: FacetScope,
) -> RunResult<'s> {
    let started = Instant::now();
    let filter = CompiledFilter::new(state);

    let t = Instant::now();
    let candidates = prefilter(store.records(), &filter, language);
    let prefilter_time = t.elapsed();
    let candidate_count = candidates.len();

    let t = Instant::now();
    let matched = filter_records(candidates, &filter);
    let filter_time = t.elapsed();

    let t = Instant::now();
    let ranked = rank(matched, state);
    let rank_time = t.elapsed();

    let t = Instant::now();
    let facets = build_options(store, state, language, scope);
    let facet_time = t.elapsed();

    let metrics = RunMetrics {
        total: started.elapsed(),
        prefilter: prefilter_time,
        filter: filter_time,
        rank: rank_time,
        facets: facet_time,
        candidates: candidate_count,
        matched: ranked.len(),
        author_gate: filter.author_gate(),
    };
    debug!(
        language = %language,
        candidates = metrics.candidates,
        matched = metrics.matched,
        author_gate = metrics.author_gate,
        elapsed = ?metrics.total,
        "search run"
    );

    RunResult { records: ranked, facets, metrics }
}
