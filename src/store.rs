//! Read-only record store.
//!
//! The store is loaded once at process start and never mutated afterwards. It
//! holds the ordered corpus plus one id → metadata table per axis. Corpus order
//! matters: ranking ties fall back to it.
//!
//! ## On-disk layout
//!
//! ```text
//! <dir>/sentences.json   [Record, ...]
//! <dir>/authors.json     [TagMeta, ...]
//! <dir>/works.json       [TagMeta, ...]   (legacy name: books.json)
//! <dir>/genres.json      [TagMeta, ...]
//! <dir>/times.json       [TagMeta, ...]
//! <dir>/themes.json      [TagMeta, ...]
//! <dir>/devices.json     [TagMeta, ...]
//! ```
//!
//! A missing metadata file yields an empty table (and a warning); a missing
//! `sentences.json` is an error.

use crate::{Axis, Error, Language, Record, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Metadata of one tag id on one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMeta {
    pub id: String,
    #[serde(default, rename = "name_zh", skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, rename = "name_en", skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, rename = "title_zh", skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(default, rename = "title_en", skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Decorative prefix shown before the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Owning author, for works.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
}

impl TagMeta {
    /// Label in `language`, if any. Names win over titles; blank strings count
    /// as absent.
    pub fn label(&self, language: Language) -> Option<&str> {
        let (name, title) = match language {
            Language::Primary => (&self.name_zh, &self.title_zh),
            Language::Secondary => (&self.name_en, &self.title_en),
        };
        name.as_deref().filter(|s| !s.trim().is_empty()).or_else(|| title.as_deref().filter(|s| !s.trim().is_empty()))
    }

    pub fn prefix(&self) -> Option<&str> {
        self.emoji.as_deref().filter(|s| !s.is_empty())
    }
}

/// Id → metadata lookup for one axis. Keeps file order for listing.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    entries: Vec<TagMeta>,
    by_id: HashMap<String, usize>,
}

impl TagTable {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TagMeta>,
    {
        let mut table = TagTable::default();
        for meta in entries {
            if table.by_id.contains_key(&meta.id) {
                debug!(id = %meta.id, "duplicate tag id ignored");
                continue;
            }
            table.by_id.insert(meta.id.clone(), table.entries.len());
            table.entries.push(meta);
        }
        table
    }

    pub fn get(&self, id: &str) -> Option<&TagMeta> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagMeta> {
        self.entries.iter()
    }
}

/// The immutable corpus plus per-axis metadata tables.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    tables: HashMap<Axis, TagTable>,
}

impl RecordStore {
    /// Build a store with no metadata tables. Use [`RecordStore::with_table`]
    /// to attach them.
    pub fn new(records: Vec<Record>) -> Self {
        RecordStore { records, tables: HashMap::new() }
    }

    pub fn with_table<I>(mut self, axis: Axis, entries: I) -> Self
    where
        I: IntoIterator<Item = TagMeta>,
    {
        self.tables.insert(axis, TagTable::new(entries));
        self
    }

    /// Load a dataset directory (see the module docs for the layout).
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let records: Vec<Record> = read_json(&dir.join("sentences.json"))?;
        let mut store = RecordStore::new(records);

        for axis in Axis::ALL {
            let mut path = dir.join(format!("{}.json", axis.param_name()));
            if axis == Axis::Work && !path.exists() {
                path = dir.join("books.json");
            }
            let entries: Vec<TagMeta> = if path.exists() {
                read_json(&path)?
            } else {
                warn!(axis = %axis, path = %path.display(), "metadata file missing; axis has no labels");
                Vec::new()
            };
            store = store.with_table(axis, entries);
        }

        debug!(records = store.records.len(), dir = %dir.display(), "dataset loaded");
        Ok(store)
    }

    /// Records in corpus order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn table(&self, axis: Axis) -> Option<&TagTable> {
        self.tables.get(&axis)
    }

    pub fn meta(&self, axis: Axis, id: &str) -> Option<&TagMeta> {
        self.tables.get(&axis)?.get(id)
    }

    /// True when `id` exists in the metadata table of `axis`.
    pub fn knows(&self, axis: Axis, id: &str) -> bool {
        self.meta(axis, id).is_some()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| Error::Json { what: path.display().to_string(), source })
}
