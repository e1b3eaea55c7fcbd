//! One browsing session: the owner of every piece of mutable state.
//!
//! ```text
//!   edit ──► FilterState ──► search ──► results + facets   (immediately)
//!                │
//!                ├──► history channel (300 ms) ──► History::push
//!                └──► url channel     (200 ms) ──► QueryParams
//!
//!   undo/redo ──► History ──► FilterState ──► search        (history channel cancelled)
//!                                  └──► url channel
//! ```
//!
//! Channels are polled with [`Session::tick`]; nothing runs on its own. A
//! replay bypasses the edit path and cancels the history channel, so an undo
//! never re-enters the stack as a new change.
//!
//! Selections only ever hold ids known to the store: unknown ids are dropped
//! when the session starts and refused by every edit afterwards.

use crate::api::{Options, SearchResult, search_with};
use crate::debounce::{Clock, Debounce, SystemClock};
use crate::engine::{Page, paginate};
use crate::history::History;
use crate::keys::{Command, KeyChord, command_for};
use crate::{Axis, FilterState, Language, MatchMode, QueryParams, Record, RecordStore, SessionConfig};
use tracing::{debug, warn};

/// What a [`Session::tick`] or [`Session::flush`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    /// A snapshot was pushed to the history.
    pub committed: bool,
    /// The URL channel fired; the encoded state to publish.
    pub params: Option<QueryParams>,
}

pub struct Session<'s, C: Clock = SystemClock> {
    store: &'s RecordStore,
    language: Language,
    state: FilterState,
    history: History,
    history_timer: Debounce,
    url_timer: Debounce,
    page: usize,
    page_size: usize,
    options: Options,
    clock: C,
    result: SearchResult<'s>,
}

impl<'s, C: Clock> Session<'s, C> {
    /// Start a session. Ids unknown to `store` are dropped from `state` before
    /// it becomes the first history entry.
    pub fn new(
        store: &'s RecordStore,
        mut state: FilterState,
        language: Language,
        config: SessionConfig,
        clock: C,
    ) -> Self {
        state.retain_known(store);

        let mut history = History::with_capacity(config.history_capacity);
        history.init(state.clone());
        let options = Options::from(&config);
        let result = search_with(store, &state, language, &options);

        Self {
            store,
            language,
            state,
            history,
            history_timer: Debounce::new(config.history_debounce()),
            url_timer: Debounce::new(config.url_debounce()),
            page: 1,
            page_size: config.page_size,
            options,
            clock,
            result,
        }
    }

    /// Start a session from decoded URL parameters.
    pub fn from_params(
        store: &'s RecordStore,
        params: &QueryParams,
        language: Language,
        config: SessionConfig,
        clock: C,
    ) -> Self {
        Self::new(store, FilterState::from_params(params), language, config, clock)
    }

    // --- Edits -----------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        self.edit(|state| state.set_query(query))
    }

    pub fn clear_search(&mut self) -> bool {
        self.edit(FilterState::clear_search)
    }

    /// Toggle `id` on `axis`. Ids unknown to the store are refused.
    pub fn toggle(&mut self, axis: Axis, id: &str) -> bool {
        if !self.store.knows(axis, id) {
            warn!(axis = %axis, id, "refused to select unknown tag id");
            return false;
        }
        self.edit(|state| {
            state.toggle(axis, id);
        })
    }

    pub fn set_selected<I, S>(&mut self, axis: Axis, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (known, unknown): (Vec<String>, Vec<String>) =
            ids.into_iter().map(Into::into).partition(|id| self.store.knows(axis, id));
        if !unknown.is_empty() {
            warn!(axis = %axis, ?unknown, "dropped unknown tag ids from selection");
        }
        self.edit(|state| state.set_selected(axis, known))
    }

    pub fn set_match_mode(&mut self, axis: Axis, mode: MatchMode) -> bool {
        self.edit(|state| {
            state.set_match_mode(axis, mode);
        })
    }

    /// Clear the query, every selection and every match mode.
    pub fn reset_all(&mut self) -> bool {
        self.edit(FilterState::reset_all)
    }

    /// Apply `f`; if the state changed, go back to page 1, search again and
    /// restart both channels.
    fn edit(&mut self, f: impl FnOnce(&mut FilterState)) -> bool {
        let before = self.state.clone();
        f(&mut self.state);
        if self.state == before {
            return false;
        }

        self.page = 1;
        self.recompute();
        let now = self.clock.now();
        self.history_timer.schedule(now);
        self.url_timer.schedule(now);
        true
    }

    // --- Channels --------------------------------------------------------

    /// Fire every channel whose deadline has passed.
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        let committed = self.history_timer.fire_if_due(now) && self.commit();
        let params = self.url_timer.fire_if_due(now).then(|| self.state.to_params());
        Tick { committed, params }
    }

    /// Fire every pending channel now.
    pub fn flush(&mut self) -> Tick {
        let committed = self.history_timer.is_pending() && {
            self.history_timer.cancel();
            self.commit()
        };
        let params = self.url_timer.is_pending().then(|| {
            self.url_timer.cancel();
            self.state.to_params()
        });
        Tick { committed, params }
    }

    fn commit(&mut self) -> bool {
        let pushed = self.history.push(self.state.clone());
        if pushed {
            debug!(len = self.history.len(), cursor = self.history.cursor(), "history snapshot");
        }
        pushed
    }

    // --- Undo / redo -----------------------------------------------------

    /// Step back one snapshot. A pending edit is committed first, so undo
    /// returns to the state before it.
    pub fn undo(&mut self) -> bool {
        self.flush_history();
        match self.history.undo() {
            Some(snapshot) => {
                self.replay(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.flush_history();
        match self.history.redo() {
            Some(snapshot) => {
                self.replay(snapshot);
                true
            }
            None => false,
        }
    }

    fn flush_history(&mut self) {
        if self.history_timer.is_pending() {
            self.history_timer.cancel();
            self.commit();
        }
    }

    /// Apply a history snapshot without scheduling a commit.
    fn replay(&mut self, snapshot: FilterState) {
        self.history_timer.cancel();
        self.state = snapshot;
        self.page = 1;
        self.recompute();
        self.url_timer.schedule(self.clock.now());
        debug!(cursor = self.history.cursor(), "history replayed");
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.has_uncommitted_edit()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.has_uncommitted_edit()
    }

    /// A debounced edit would change the snapshot under the cursor.
    fn has_uncommitted_edit(&self) -> bool {
        self.history_timer.is_pending() && self.history.current() != Some(&self.state)
    }

    // --- Language --------------------------------------------------------

    /// Switch the active language. The filter state and history are kept.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        self.page = 1;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.result = search_with(self.store, &self.state, self.language, &self.options);
    }

    // --- Paging ----------------------------------------------------------

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.result.total.div_ceil(self.page_size.max(1))
    }

    /// Jump to `page`, clamped into range. Returns true if the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.page_count().max(1));
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Records of the current page.
    pub fn page_view(&self) -> Page<'_, &'s Record> {
        paginate(&self.result.records, self.page, self.page_size)
    }

    // --- Keys ------------------------------------------------------------

    /// Run the command bound to `chord`. Returns true if anything happened.
    pub fn handle_key(&mut self, chord: &KeyChord) -> bool {
        match command_for(chord) {
            Some(Command::Undo) => self.undo(),
            Some(Command::Redo) => self.redo(),
            Some(Command::PreviousPage) if self.page_count() > 1 => self.previous_page(),
            Some(Command::NextPage) if self.page_count() > 1 => self.next_page(),
            _ => false,
        }
    }

    // --- Accessors -------------------------------------------------------

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn results(&self) -> &SearchResult<'s> {
        &self.result
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
