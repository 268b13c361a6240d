use super::{KeyTable, StatKey};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs;

const LOG_TARGET: &str = "      keys";

/// Somewhere raw statistics keys can be obtained from
///
/// Connecting to a live cluster is left to implementations outside this crate;
/// the pipeline only ever sees the resulting table.
pub trait KeySource {
    /// Fetch every key the source knows about, one entry per literal key name
    fn fetch(&self) -> Result<KeyTable>;
}

/// Reads a statistics keys dump saved from the cluster API
#[derive(Debug, Clone)]
pub struct FileKeySource {
    path: Utf8PathBuf,
}

impl FileKeySource {
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl KeySource for FileKeySource {
    fn fetch(&self) -> Result<KeyTable> {
        let text = fs::read_to_string(&self.path).into_app_err_with(|| format!("reading statistics keys from '{}'", self.path))?;
        let table = parse_key_dump(&text).into_app_err_with(|| format!("parsing statistics keys in '{}'", self.path))?;
        log::info!(target: LOG_TARGET, "Loaded {} statistics keys from '{}'", table.len(), self.path);
        Ok(table)
    }
}

/// The shapes a keys dump may take: the API response object, or just its list
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyDump {
    Response { keys: Vec<StatKey> },
    List(Vec<StatKey>),
}

/// Parse a JSON keys dump into a table keyed by each record's `key` field
pub fn parse_key_dump(text: &str) -> Result<KeyTable, serde_json::Error> {
    let records = match serde_json::from_str(text)? {
        KeyDump::Response { keys } | KeyDump::List(keys) => keys,
    };

    Ok(records.into_iter().collect())
}
