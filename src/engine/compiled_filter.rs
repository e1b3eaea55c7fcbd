//! Per-state precomputation.
//!
//! Every record test needs the folded query and the set of constrained axes.
//! Computing those once per search keeps the per-record path allocation-light
//! (only the record text is folded).
//!
//! ## Invariants
//!
//! - `active` only contains axes whose selection in `state` is non-empty;
//!   [`CompiledFilter::without`] can remove more, never add.
//! - `needle` is `None` exactly when the trimmed query is empty.

use crate::text::fold;
use crate::{Axis, AxisSet, FilterState, MatchMode, Record};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct CompiledFilter<'f> {
    state: &'f FilterState,
    needle: Option<String>,
    active: AxisSet,
}

impl<'f> CompiledFilter<'f> {
    pub fn new(state: &'f FilterState) -> Self {
        CompiledFilter { state, needle: state.trimmed_query().map(fold), active: state.active_axes() }
    }

    /// Same filter with `axis` left unconstrained.
    pub fn without(&self, axis: Axis) -> Self {
        CompiledFilter { state: self.state, needle: self.needle.clone(), active: self.active - axis.flag() }
    }

    pub fn state(&self) -> &'f FilterState {
        self.state
    }

    /// Folded, trimmed query; `None` when there is no text constraint.
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn active(&self) -> AxisSet {
        self.active
    }

    pub fn constrains(&self, axis: Axis) -> bool {
        self.active.contains(axis.flag())
    }

    /// Whether the author OR-gate runs as its own phase.
    pub fn author_gate(&self) -> bool {
        self.constrains(Axis::Author)
    }

    pub(crate) fn selection(&self, axis: Axis) -> &'f BTreeSet<String> {
        self.state.selected(axis)
    }

    pub(crate) fn mode(&self, axis: Axis) -> MatchMode {
        self.state.match_mode(axis)
    }

    /// Evaluate one axis gate. Unconstrained axes always pass.
    pub(crate) fn axis_passes(&self, record: &Record, axis: Axis) -> bool {
        if !self.constrains(axis) {
            return true;
        }
        let selected = self.selection(axis);
        let own = record.tag_ids(axis);
        if !axis.is_multi_valued() {
            return own.iter().any(|id| selected.contains(id));
        }
        match self.mode(axis) {
            MatchMode::All => selected.iter().all(|id| own.contains(id)),
            MatchMode::Any => selected.iter().any(|id| own.contains(id)),
        }
    }
}
