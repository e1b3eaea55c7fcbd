//! Facet options for the tag rail.
//!
//! For each axis the rail lists every tag id reachable under the current
//! language and text query. Tag selections do not narrow the list, not even
//! selections on sibling axes: a chip never disappears because it (or a
//! neighbour) was clicked.
//!
//! [`FacetScope::Contextual`] is the alternative policy: each axis's candidates
//! are additionally narrowed by every *other* axis's selection. It is a product
//! choice, kept behind a switch.
//!
//! ## Failure policy
//!
//! The rail must always render. [`build_options`] returns one (possibly empty)
//! list per axis; if the computation fails it logs and returns all-empty lists.
//!
//! ## Ordering
//!
//! Labels are collated for the active language (pinyin order for the primary
//! language) on their bare text, without decorative prefix or title marks. The
//! tag id breaks ties. Without collation data the order degrades to a
//! case-folded comparison.

use super::compiled_filter::CompiledFilter;
use super::predicate::{filter_records, prefilter};
use crate::labels::label_parts;
use crate::text::fold;
use crate::{Axis, Error, FilterState, Language, Record, RecordStore, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};
use icu_locale_core::{Locale, locale};
use std::collections::HashSet;
use tracing::{trace, warn};

/// One selectable tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
}

/// Options for every axis. Indexed by [`Axis`], so no axis can be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    by_axis: [Vec<FacetOption>; Axis::COUNT],
}

impl FacetOptions {
    /// All-empty options.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, axis: Axis) -> &[FacetOption] {
        &self.by_axis[axis.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &[FacetOption])> {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    /// True when no axis has any option.
    pub fn is_empty(&self) -> bool {
        self.by_axis.iter().all(Vec::is_empty)
    }

    pub fn contains(&self, axis: Axis, id: &str) -> bool {
        self.get(axis).iter().any(|o| o.id == id)
    }
}

/// Which records feed an axis's option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetScope {
    /// Language and text query only.
    #[default]
    LanguageAndText,
    /// Also narrowed by the selections of the other axes.
    Contextual,
}

/// Build options for every axis; never fails.
pub fn build_options(store: &RecordStore, state: &FilterState, language: Language, scope: FacetScope) -> FacetOptions {
    match try_build_options(store, state, language, scope) {
        Ok(options) => options,
        Err(err) => {
            warn!(error = %err, "facet computation failed; tag rail left empty");
            FacetOptions::empty()
        }
    }
}

fn try_build_options(
    store: &RecordStore,
    state: &FilterState,
    language: Language,
    scope: FacetScope,
) -> Result<FacetOptions> {
    let filter = CompiledFilter::new(state);
    let base = prefilter(store.records(), &filter, language);
    let order = LabelOrder::new(language);
    let mut out = FacetOptions::empty();

    for axis in Axis::ALL {
        let table = store.table(axis).ok_or(Error::MissingTable(axis))?;
        let candidates: Vec<&Record> = match scope {
            FacetScope::LanguageAndText => base.clone(),
            FacetScope::Contextual => filter_records(base.clone(), &filter.without(axis)),
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut options: Vec<(String, FacetOption)> = Vec::new();
        for record in candidates {
            let ids = record.tag_ids(axis);
            if !axis.is_multi_valued() && ids.iter().all(|id| id.is_empty()) {
                return Err(Error::MissingField { record: record.id.clone(), axis });
            }
            for id in ids {
                if id.is_empty() || !seen.insert(id.as_str()) {
                    continue;
                }
                let Some(meta) = table.get(id) else {
                    trace!(axis = %axis, id = %id, "tag id without metadata skipped");
                    continue;
                };
                let (sort_key, label) = label_parts(Some(meta), axis, id, language);
                options.push((sort_key, FacetOption { id: id.clone(), label }));
            }
        }

        options.sort_by(|(ka, a), (kb, b)| order.compare(ka, kb).then_with(|| a.id.cmp(&b.id)));
        out.by_axis[axis.index()] = options.into_iter().map(|(_, option)| option).collect();
    }

    Ok(out)
}

/// Locale-aware label comparison for one language.
struct LabelOrder {
    collator: Option<CollatorBorrowed<'static>>,
}

impl LabelOrder {
    fn new(language: Language) -> Self {
        let locale: Locale = match language {
            Language::Primary => locale!("zh"),
            Language::Secondary => locale!("en"),
        };
        let collator = match Collator::try_new((&locale).into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(error = %err, locale = %locale, "no collation data; labels sorted case-folded");
                None
            }
        };
        Self { collator }
    }

    #[cfg(test)]
    fn folded() -> Self {
        Self { collator: None }
    }

    /// Collated (or case-folded) order first, exact text as tie-breaker.
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => fold(a).cmp(&fold(b)),
        };
        primary.then_with(|| a.cmp(b))
    }
}
