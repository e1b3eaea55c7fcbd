use serde::{Deserialize, Serialize};
use std::fmt;

mod api;
mod config;
mod debounce;
mod engine;
mod error;
mod history;
mod keys;
mod labels;
mod params;
mod session;
mod state;
mod store;
mod text;

#[cfg(test)]
mod fixtures;

pub use api::{Options, SearchDetails, SearchResult, SearchResultVerbose, search, search_verbose_with, search_with};
pub use config::{MAX_DEBOUNCE_MS, SessionConfig};
pub use debounce::{Clock, Debounce, ManualClock, SystemClock};
pub use engine::{
    CompiledFilter, FacetOption, FacetOptions, FacetScope, Page, build_options, match_strength, matches, paginate,
    rank,
};
pub use error::{Error, Result};
pub use history::{DEFAULT_CAPACITY, History};
pub use keys::{Command, Key, KeyChord, command_for};
pub use labels::{SentenceTag, display_label, sentence_tags};
pub use params::QueryParams;
pub use session::{Session, Tick};
pub use state::FilterState;
pub use store::{RecordStore, TagMeta, TagTable};
pub use text::{strip_id_prefix, truncate};

// --- Languages ---------------------------------------------------------------

/// Language of a record and of the browsing session.
///
/// The corpus is bilingual: every record belongs to exactly one language and
/// a session only ever shows records of its active language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Primary corpus language (Chinese, code `zh`).
    #[default]
    #[serde(rename = "zh")]
    Primary,
    /// Secondary corpus language (English, code `en`).
    #[serde(rename = "en")]
    Secondary,
}

impl Language {
    /// Map a UI locale to the corpus language. Only `en` (and `en-*`) select
    /// the secondary language; everything else falls back to the primary one.
    pub fn from_locale(locale: &str) -> Self {
        let lower = locale.trim().to_ascii_lowercase();
        if lower == "en" || lower.starts_with("en-") || lower.starts_with("en_") {
            Language::Secondary
        } else {
            Language::Primary
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Primary => "zh",
            Language::Secondary => "en",
        }
    }

    /// The language used as label fallback.
    pub fn other(self) -> Self {
        match self {
            Language::Primary => Language::Secondary,
            Language::Secondary => Language::Primary,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// --- Axes --------------------------------------------------------------------

/// One independent classification dimension of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Author,
    Work,
    Genre,
    Time,
    Theme,
    Device,
}

impl Axis {
    pub const COUNT: usize = 6;

    /// Every axis, in display order. Facet results and tag chips follow it.
    pub const ALL: [Axis; Axis::COUNT] = [Axis::Author, Axis::Work, Axis::Genre, Axis::Time, Axis::Theme, Axis::Device];

    /// Stable position of the axis inside per-axis arrays.
    pub const fn index(self) -> usize {
        match self {
            Axis::Author => 0,
            Axis::Work => 1,
            Axis::Genre => 2,
            Axis::Time => 3,
            Axis::Theme => 4,
            Axis::Device => 5,
        }
    }

    /// Author and work carry exactly one id per record; the other axes carry
    /// id sets and honour a [`MatchMode`].
    pub const fn is_multi_valued(self) -> bool {
        !matches!(self, Axis::Author | Axis::Work)
    }

    pub const fn flag(self) -> AxisSet {
        match self {
            Axis::Author => AxisSet::AUTHOR,
            Axis::Work => AxisSet::WORK,
            Axis::Genre => AxisSet::GENRE,
            Axis::Time => AxisSet::TIME,
            Axis::Theme => AxisSet::THEME,
            Axis::Device => AxisSet::DEVICE,
        }
    }

    /// Name of the comma-joined selection parameter at the URL boundary.
    pub const fn param_name(self) -> &'static str {
        match self {
            Axis::Author => "authors",
            Axis::Work => "works",
            Axis::Genre => "genres",
            Axis::Time => "times",
            Axis::Theme => "themes",
            Axis::Device => "devices",
        }
    }

    /// Name of the match-mode flag parameter; `None` for single-valued axes.
    pub const fn mode_param_name(self) -> Option<&'static str> {
        match self {
            Axis::Author | Axis::Work => None,
            Axis::Genre => Some("genresAll"),
            Axis::Time => Some("timesAll"),
            Axis::Theme => Some("themesAll"),
            Axis::Device => Some("devicesAll"),
        }
    }

    /// Inverse of [`Axis::param_name`]. `books` is accepted for works.
    pub fn from_param_name(name: &str) -> Option<Self> {
        match name {
            "authors" => Some(Axis::Author),
            "works" | "books" => Some(Axis::Work),
            "genres" => Some(Axis::Genre),
            "times" => Some(Axis::Time),
            "themes" => Some(Axis::Theme),
            "devices" => Some(Axis::Device),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Author => "author",
            Axis::Work => "work",
            Axis::Genre => "genre",
            Axis::Time => "time",
            Axis::Theme => "theme",
            Axis::Device => "device",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// A set of axes, e.g. the axes a filter state constrains.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisSet: u8 {
        const AUTHOR = 1 << 0;
        const WORK   = 1 << 1;
        const GENRE  = 1 << 2;
        const TIME   = 1 << 3;
        const THEME  = 1 << 4;
        const DEVICE = 1 << 5;
    }
}

impl AxisSet {
    /// Iterate the member axes in [`Axis::ALL`] order.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |axis| self.contains(axis.flag()))
    }
}

/// How several selected ids on one multi-valued axis combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// At least one selected id must be present (union).
    #[default]
    Any,
    /// Every selected id must be present (intersection).
    All,
}

// --- Records -----------------------------------------------------------------

/// One tagged excerpt of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub text: String,
    pub language: Language,
    pub author_id: String,
    #[serde(alias = "bookId")]
    pub work_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<String>,
    #[serde(default)]
    pub time_ids: Vec<String>,
    #[serde(default)]
    pub theme_ids: Vec<String>,
    #[serde(default)]
    pub device_ids: Vec<String>,
}

impl Record {
    /// Tag ids of this record on `axis`. Single-valued axes yield a one-element
    /// slice so callers can treat every axis uniformly.
    pub fn tag_ids(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Author => std::slice::from_ref(&self.author_id),
            Axis::Work => std::slice::from_ref(&self.work_id),
            Axis::Genre => &self.genre_ids,
            Axis::Time => &self.time_ids,
            Axis::Theme => &self.theme_ids,
            Axis::Device => &self.device_ids,
        }
    }
}
