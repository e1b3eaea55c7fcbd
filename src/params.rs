//! URL boundary: filter state ⇄ named string parameters.
//!
//! ```text
//! q=moon&authors=lu-xun,jk&timesAll=true
//!   │        │                 └─ mode flag: only "true" means ALL
//!   │        └─ comma-joined ids, empty segments dropped
//!   └─ raw query text
//! ```
//!
//! An absent key means "no constraint" (or the default ANY mode). Decoding
//! never fails; garbage values degrade to defaults.

use crate::{Axis, FilterState, MatchMode};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use tracing::debug;

const QUERY_KEY: &str = "q";

/// Characters escaped in query-string values. Commas stay literal because
/// they separate list items.
const VALUE_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~').remove(b',');

/// Decoded parameter shape: one string value per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: BTreeMap<String, String>,
}

impl QueryParams {
    /// Collect decoded pairs. Repeated keys are comma-joined, the way an
    /// array-valued router query would be.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in pairs {
            let value = value.into();
            out.entry(key.into())
                .and_modify(|existing| {
                    existing.push(',');
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        QueryParams { pairs: out }
    }

    /// Parse `a=b&c=d` (a leading `?` is allowed). `+` decodes to a space.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query.split('&').filter(|part| !part.is_empty()).map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(key), decode_component(value))
        });
        QueryParams::from_pairs(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded `key=value&...` in key order.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!("{}={}", utf8_percent_encode(k, VALUE_ESCAPES), utf8_percent_encode(v, VALUE_ESCAPES))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Encode a state. Empty query, empty selections and ANY modes are
    /// omitted.
    pub fn encode(state: &FilterState) -> Self {
        let mut pairs = BTreeMap::new();
        if !state.query().is_empty() {
            pairs.insert(QUERY_KEY.to_string(), state.query().to_string());
        }
        for axis in Axis::ALL {
            let selected = state.selected(axis);
            if !selected.is_empty() {
                let joined = selected.iter().map(String::as_str).collect::<Vec<_>>().join(",");
                pairs.insert(axis.param_name().to_string(), joined);
            }
            if state.match_mode(axis) == MatchMode::All {
                if let Some(flag) = axis.mode_param_name() {
                    pairs.insert(flag.to_string(), "true".to_string());
                }
            }
        }
        QueryParams { pairs }
    }

    /// Decode into a state. Unknown keys are ignored.
    pub fn decode(&self) -> FilterState {
        let mut state = FilterState::new();
        if let Some(q) = self.get(QUERY_KEY) {
            state.set_query(q);
        }
        for (key, value) in &self.pairs {
            if let Some(axis) = Axis::from_param_name(key) {
                let ids = value.split(',').map(str::trim).filter(|id| !id.is_empty());
                for id in ids {
                    state.select(axis, id);
                }
            }
        }
        for axis in Axis::ALL {
            let Some(flag) = axis.mode_param_name() else { continue };
            match self.get(flag) {
                Some("true") => {
                    state.set_match_mode(axis, MatchMode::All);
                }
                Some("false") | None => {}
                Some(other) => debug!(param = flag, value = other, "unrecognised match-mode flag; using ANY"),
            }
        }
        state
    }
}

impl From<&FilterState> for QueryParams {
    fn from(state: &FilterState) -> Self {
        QueryParams::encode(state)
    }
}

impl FilterState {
    pub fn from_params(params: &QueryParams) -> Self {
        params.decode()
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::encode(self)
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn decode_reads_lists_flags_and_legacy_keys() {
        let params = QueryParams::from_pairs([
            ("q", "  moon "),
            ("authors", "lu-xun,,jk"),
            ("books", "hp"),
            ("timesAll", "true"),
            ("themesAll", "yes"),
        ]);
        let state = params.decode();

        assert_eq!(state.query(), "  moon ");
        assert_eq!(state.selected(Axis::Author).iter().collect::<Vec<_>>(), vec!["jk", "lu-xun"]);
        assert!(state.is_selected(Axis::Work, "hp"));
        assert_eq!(state.match_mode(Axis::Time), MatchMode::All);
        assert_eq!(state.match_mode(Axis::Theme), MatchMode::Any);
    }

    #[test]
    fn encode_omits_defaults() {
        assert!(QueryParams::encode(&FilterState::default()).is_empty());

        let mut state = FilterState::new();
        state.select(Axis::Device, "irony");
        state.select(Axis::Device, "metaphor");
        state.set_match_mode(Axis::Device, MatchMode::All);
        let params = state.to_params();
        assert_eq!(params.get("devices"), Some("irony,metaphor"));
        assert_eq!(params.get("devicesAll"), Some("true"));
        assert_eq!(params.get("q"), None);
    }

    #[test]
    fn repeated_keys_are_joined() {
        let params = QueryParams::parse("?authors=a&authors=b");
        assert_eq!(params.get("authors"), Some("a,b"));
    }

    #[test]
    fn query_string_escapes_text_but_keeps_commas() {
        let mut state = FilterState::new();
        state.set_query("月 & moon");
        state.select(Axis::Genre, "fiction");
        state.select(Axis::Genre, "fantasy");
        let qs = state.to_params().to_query_string();
        assert_eq!(qs, "genres=fantasy,fiction&q=%E6%9C%88%20%26%20moon");
        assert_eq!(QueryParams::parse(&qs).decode(), state);
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(QueryParams::parse("q=winter+snow").get("q"), Some("winter snow"));
    }

    fn arb_state() -> impl Strategy<Value = FilterState> {
        let ids = prop::collection::btree_set("[a-z][a-z0-9-]{0,6}", 0..4);
        (
            "[^,]{0,12}",
            prop::collection::vec(ids, Axis::COUNT),
            prop::collection::vec(any::<bool>(), Axis::COUNT),
        )
            .prop_map(|(query, selections, flags)| {
                let mut state = FilterState::new();
                state.set_query(query);
                for ((axis, ids), all) in Axis::ALL.into_iter().zip(selections).zip(flags) {
                    state.set_selected(axis, ids);
                    if all {
                        state.set_match_mode(axis, MatchMode::All);
                    }
                }
                state
            })
    }

    proptest! {
        #[test]
        fn params_round_trip(state in arb_state()) {
            prop_assert_eq!(QueryParams::encode(&state).decode(), state.clone());
            prop_assert_eq!(QueryParams::parse(&state.to_params().to_query_string()).decode(), state);
        }
    }
}
