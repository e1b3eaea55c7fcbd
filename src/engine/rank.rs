//! Result ordering and paging.

use super::predicate::match_strength;
use crate::{FilterState, Record};
use std::cmp::Reverse;

/// Order matching records by match-strength, strongest first.
///
/// The sort is stable: equal strengths keep corpus order, so the same state
/// always yields the same sequence.
pub fn rank<'r>(matching: Vec<&'r Record>, state: &FilterState) -> Vec<&'r Record> {
    if state.active_axes().is_empty() {
        // every strength is zero
        return matching;
    }
    let mut scored: Vec<(u32, &Record)> = matching.into_iter().map(|r| (match_strength(r, state), r)).collect();
    scored.sort_by_key(|&(strength, _)| Reverse(strength));
    scored.into_iter().map(|(_, r)| r).collect()
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually served (clamped into range).
    pub number: usize,
    /// Total pages; 0 when there are no items.
    pub count: usize,
    pub total: usize,
}

/// Cut `items` into pages of `page_size` and return page `page` (1-based).
///
/// Out-of-range requests are clamped to the nearest existing page. A zero
/// `page_size` is treated as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total = items.len();
    let count = total.div_ceil(size);
    if count == 0 {
        return Page { items: &[], number: 1, count: 0, total: 0 };
    }
    let number = page.clamp(1, count);
    let start = (number - 1) * size;
    let end = (start + size).min(total);
    Page { items: &items[start..end], number, count, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, fixtures};

    #[test]
    fn stronger_records_come_first_and_ties_keep_order() {
        let records = fixtures::records();
        let en: Vec<&Record> = records.iter().filter(|r| r.id.starts_with('e')).collect();
        let mut state = FilterState::new();
        state.select(Axis::Theme, "friendship");
        state.select(Axis::Theme, "love");

        let ranked = rank(en, &state);
        // e6 carries both themes; e2, e3, e5 one each in corpus order; e1, e4 none
        assert_eq!(fixtures::ids(&ranked), vec!["e6", "e2", "e3", "e5", "e1", "e4"]);
    }

    #[test]
    fn unconstrained_state_keeps_corpus_order() {
        let records = fixtures::records();
        let all: Vec<&Record> = records.iter().collect();
        let ranked = rank(all.clone(), &FilterState::new());
        assert_eq!(ranked, all);
    }

    #[test]
    fn paginate_clamps_page_numbers() {
        let items: Vec<u32> = (1..=23).collect();
        let first = paginate(&items, 0, 10);
        assert_eq!((first.number, first.count, first.items.len()), (1, 3, 10));

        let last = paginate(&items, 9, 10);
        assert_eq!(last.number, 3);
        assert_eq!(last.items, &[21, 22, 23]);
    }

    #[test]
    fn paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 4, 10);
        assert_eq!((page.number, page.count, page.total), (1, 0, 0));
        assert!(page.items.is_empty());
    }
}
