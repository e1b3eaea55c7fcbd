//! Record predicates.
//!
//! Gates run cheapest-first and stop at the first failure:
//!
//! ```text
//! language ──▶ text ──▶ author (OR) ──▶ work ──▶ genre ──▶ time ──▶ theme ──▶ device
//! ```
//!
//! ## Cross-axis policy
//!
//! When authors are selected, the author gate is a standalone OR-filter over
//! the candidates and every other axis is then intersected against that
//! subset: "everything by these authors, narrowed by these other tags".
//! Selecting two authors therefore unions their corpora. Without an author
//! selection all axes combine with uniform AND.
//!
//! `filter_records` runs the policy as two explicit phases over a candidate
//! list; `matches` answers the same question for a single record.

use super::compiled_filter::CompiledFilter;
use crate::text::contains_folded;
use crate::{Axis, FilterState, Language, MatchMode, Record};
use tracing::trace;

// Order in which the non-author axis gates run.
const INTERSECTED_AXES: [Axis; 5] = [Axis::Work, Axis::Genre, Axis::Time, Axis::Theme, Axis::Device];

/// True when `record` passes every gate of `state` for `language`.
pub fn matches(record: &Record, state: &FilterState, language: Language) -> bool {
    let filter = CompiledFilter::new(state);
    passes_prefilter(record, &filter, language)
        && filter.axis_passes(record, Axis::Author)
        && passes_intersected(record, &filter)
}

/// Ranking score: how many selected tags the record carries.
///
/// - single-valued axes: 1 when the record's id is selected
/// - ANY axes: number of selected ids present
/// - ALL axes: the selected count, only when every id is present
///
/// Never used for admission.
pub fn match_strength(record: &Record, state: &FilterState) -> u32 {
    let mut score = 0u32;
    for axis in state.active_axes().axes() {
        let selected = state.selected(axis);
        let own = record.tag_ids(axis);
        let present = selected.iter().filter(|id| own.contains(*id)).count() as u32;
        score += if !axis.is_multi_valued() {
            present.min(1)
        } else {
            match state.match_mode(axis) {
                MatchMode::Any => present,
                MatchMode::All if present as usize == selected.len() => present,
                MatchMode::All => 0,
            }
        };
    }
    score
}

/// Language and text gates over the whole corpus, keeping corpus order.
pub(crate) fn prefilter<'r>(records: &'r [Record], filter: &CompiledFilter<'_>, language: Language) -> Vec<&'r Record> {
    records.iter().filter(|r| passes_prefilter(r, filter, language)).collect()
}

/// Apply the tag gates to already-prefiltered candidates.
pub(crate) fn filter_records<'r>(candidates: Vec<&'r Record>, filter: &CompiledFilter<'_>) -> Vec<&'r Record> {
    if filter.author_gate() {
        let by_author: Vec<&Record> =
            candidates.into_iter().filter(|r| filter.axis_passes(r, Axis::Author)).collect();
        trace!(count = by_author.len(), "author union");
        by_author.into_iter().filter(|r| passes_intersected(r, filter)).collect()
    } else {
        candidates.into_iter().filter(|r| passes_intersected(r, filter)).collect()
    }
}

fn passes_prefilter(record: &Record, filter: &CompiledFilter<'_>, language: Language) -> bool {
    if record.language != language {
        return false;
    }
    match filter.needle() {
        Some(needle) => contains_folded(&record.text, needle),
        None => true,
    }
}

fn passes_intersected(record: &Record, filter: &CompiledFilter<'_>) -> bool {
    INTERSECTED_AXES.iter().all(|&axis| filter.axis_passes(record, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn record(id: &str) -> Record {
        fixtures::records().into_iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn text_gate_is_case_insensitive_and_trimmed() {
        let mut state = FilterState::new();
        state.set_query("  MOON ");
        assert!(matches(&record("e1"), &state, Language::Secondary));
        assert!(!matches(&record("e2"), &state, Language::Secondary));
    }

    #[test]
    fn single_valued_axis_is_or_within_axis() {
        let mut state = FilterState::new();
        state.select(Axis::Work, "hp");
        state.select(Axis::Work, "lotr");
        assert!(matches(&record("e2"), &state, Language::Secondary));
        assert!(matches(&record("e4"), &state, Language::Secondary));
        assert!(!matches(&record("e1"), &state, Language::Secondary));
    }

    #[test]
    fn all_mode_requires_every_id() {
        let mut state = FilterState::new();
        state.select(Axis::Theme, "friendship");
        state.select(Axis::Theme, "love");
        state.set_match_mode(Axis::Theme, MatchMode::All);
        assert!(matches(&record("e6"), &state, Language::Secondary));
        assert!(!matches(&record("e2"), &state, Language::Secondary));

        state.set_match_mode(Axis::Theme, MatchMode::Any);
        assert!(matches(&record("e2"), &state, Language::Secondary));
    }

    #[test]
    fn author_selection_is_intersected_with_other_axes() {
        let mut state = FilterState::new();
        state.select(Axis::Author, "jk");
        state.select(Axis::Author, "tolkien");
        state.select(Axis::Time, "dawn");
        assert!(matches(&record("e2"), &state, Language::Secondary));
        assert!(!matches(&record("e3"), &state, Language::Secondary));
    }

    #[test]
    fn strength_counts_per_mode() {
        let e3 = record("e3");
        let mut state = FilterState::new();
        state.select(Axis::Author, "tolkien");
        state.select(Axis::Device, "metaphor");
        state.select(Axis::Device, "irony");
        state.select(Axis::Device, "simile");
        // author 1 + two of three devices under ANY
        assert_eq!(match_strength(&e3, &state), 3);

        state.set_match_mode(Axis::Device, MatchMode::All);
        assert_eq!(match_strength(&e3, &state), 1);

        state.deselect(Axis::Device, "simile");
        assert_eq!(match_strength(&e3, &state), 3);
    }

    #[test]
    fn strength_ignores_query_and_language() {
        let mut state = FilterState::new();
        state.set_query("zzz");
        assert_eq!(match_strength(&record("z1"), &state), 0);
    }
}
