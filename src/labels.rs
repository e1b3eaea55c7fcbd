//! Label resolution and per-record tag chips.

use crate::{Axis, FilterState, Language, Record, RecordStore, TagMeta};
use serde::Serialize;

/// Resolve the label of `id` on `axis`.
///
/// Returns `(sort_key, label)`. The sort key is the bare text; the label adds
/// the decorative prefix and, for work titles in the primary language, the
/// 《》 title marks. Lookup order: active language, other language, raw id.
pub(crate) fn label_parts(meta: Option<&TagMeta>, axis: Axis, id: &str, language: Language) -> (String, String) {
    let Some(meta) = meta else {
        return (id.to_string(), id.to_string());
    };

    let base = meta.label(language).or_else(|| meta.label(language.other())).unwrap_or(id).trim().to_string();
    let shown = match (axis, language) {
        (Axis::Work, Language::Primary) => format!("《{base}》"),
        _ => base.clone(),
    };
    let label = match meta.prefix() {
        Some(prefix) => format!("{prefix} {shown}"),
        None => shown,
    };
    (base, label)
}

/// Display label of a tag, falling back to the raw id for unknown ids.
pub fn display_label(store: &RecordStore, axis: Axis, id: &str, language: Language) -> String {
    label_parts(store.meta(axis, id), axis, id, language).1
}

/// One chip under a result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceTag {
    pub axis: Axis,
    pub id: String,
    pub label: String,
    /// The id is part of the current selection.
    pub matched: bool,
}

/// Chips for `record` in axis order. Ids without metadata are skipped.
pub fn sentence_tags(
    store: &RecordStore,
    record: &Record,
    state: &FilterState,
    language: Language,
) -> Vec<SentenceTag> {
    let mut tags = Vec::new();
    for axis in Axis::ALL {
        for id in record.tag_ids(axis) {
            let Some(meta) = store.meta(axis, id) else {
                continue;
            };
            let (_, label) = label_parts(Some(meta), axis, id, language);
            tags.push(SentenceTag { axis, id: id.clone(), label, matched: state.is_selected(axis, id) });
        }
    }
    tags
}
