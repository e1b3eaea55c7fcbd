use crate::Axis;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by dataset/config loading and by internal facet
/// computation. Browsing operations themselves never fail: they degrade to
/// "fewer options" or "nothing to do".
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("no tag metadata table loaded for axis `{0}`")]
    MissingTable(Axis),
    #[error("record `{record}` has no {axis} id")]
    MissingField { record: String, axis: Axis },
}

pub type Result<T> = std::result::Result<T, Error>;
