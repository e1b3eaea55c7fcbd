//! Filter state: the unit of undo/redo.
//!
//! Selections are kept in ordered sets, so two states compare equal regardless
//! of the order ids were toggled in. Single-valued axes always report
//! [`MatchMode::Any`]; their mode cannot be changed.

use crate::{Axis, AxisSet, MatchMode, RecordStore};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    query: String,
    selected: [BTreeSet<String>; Axis::COUNT],
    modes: [MatchMode; Axis::COUNT],
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw query as typed (untrimmed).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query used for matching; `None` when blank.
    pub fn trimmed_query(&self) -> Option<&str> {
        let q = self.query.trim();
        if q.is_empty() { None } else { Some(q) }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Clear the text search only; tag selections stay.
    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    pub fn selected(&self, axis: Axis) -> &BTreeSet<String> {
        &self.selected[axis.index()]
    }

    pub fn is_selected(&self, axis: Axis, id: &str) -> bool {
        self.selected[axis.index()].contains(id)
    }

    /// Flip one id. Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, axis: Axis, id: &str) -> bool {
        let set = &mut self.selected[axis.index()];
        if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, axis: Axis, id: impl Into<String>) {
        self.selected[axis.index()].insert(id.into());
    }

    pub fn deselect(&mut self, axis: Axis, id: &str) -> bool {
        self.selected[axis.index()].remove(id)
    }

    pub fn set_selected<I, S>(&mut self, axis: Axis, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected[axis.index()] = ids.into_iter().map(Into::into).filter(|id: &String| !id.is_empty()).collect();
    }

    pub fn match_mode(&self, axis: Axis) -> MatchMode {
        self.modes[axis.index()]
    }

    /// Set the mode of a multi-valued axis. Returns `false` (and changes
    /// nothing) for single-valued axes.
    pub fn set_match_mode(&mut self, axis: Axis, mode: MatchMode) -> bool {
        if !axis.is_multi_valued() {
            return false;
        }
        self.modes[axis.index()] = mode;
        true
    }

    /// Back to the default state: empty query, no selections, ANY everywhere.
    pub fn reset_all(&mut self) {
        *self = FilterState::default();
    }

    /// Axes with a non-empty selection.
    pub fn active_axes(&self) -> AxisSet {
        Axis::ALL
            .into_iter()
            .filter(|axis| !self.selected[axis.index()].is_empty())
            .fold(AxisSet::empty(), |acc, axis| acc | axis.flag())
    }

    /// True when nothing narrows the corpus beyond the language gate.
    pub fn is_unconstrained(&self) -> bool {
        self.trimmed_query().is_none() && self.active_axes().is_empty()
    }

    /// Drop ids that do not exist in the store's metadata tables and return
    /// them as `(axis, id)` pairs.
    pub fn retain_known(&mut self, store: &RecordStore) -> Vec<(Axis, String)> {
        let mut dropped = Vec::new();
        for axis in Axis::ALL {
            let set = &mut self.selected[axis.index()];
            set.retain(|id| {
                let known = store.knows(axis, id);
                if !known {
                    dropped.push((axis, id.clone()));
                }
                known
            });
        }
        if !dropped.is_empty() {
            warn!(count = dropped.len(), ?dropped, "dropped unknown tag ids from filter state");
        }
        dropped
    }
}
