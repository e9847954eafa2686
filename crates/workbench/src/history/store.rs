//! File-backed analysis history.
//!
//! The whole history is one JSON document, rewritten on every mutation via a
//! sibling temp file and a rename so a failed write never leaves a truncated
//! document behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::model::{AnalysisSnapshot, AnalysisSummary, HistoryDocument, DOCUMENT_VERSION};

pub trait AnalysisStore: Send + Sync {
    /// Insert as newest. Re-saving an existing id replaces it and moves it
    /// to the front.
    fn save(&self, snapshot: AnalysisSnapshot) -> StoreResult<()>;

    fn get(&self, id: &str) -> StoreResult<Option<AnalysisSnapshot>>;

    /// Newest first.
    fn list(&self) -> StoreResult<Vec<AnalysisSummary>>;

    /// Returns whether anything was removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;

    fn clear(&self) -> StoreResult<()>;
}

/// Put `snapshot` at the front and drop whatever falls past `max_entries`.
pub(crate) fn insert_newest(
    analyses: &mut Vec<AnalysisSnapshot>,
    snapshot: AnalysisSnapshot,
    max_entries: usize,
) {
    analyses.retain(|a| a.id != snapshot.id);
    analyses.insert(0, snapshot);
    if analyses.len() > max_entries {
        let evicted = analyses.len() - max_entries;
        analyses.truncate(max_entries);
        debug!(evicted, max_entries, "history: evicted oldest analyses");
    }
}

/// Serialize `doc`, failing if the encoded form is larger than `max_bytes`.
pub(crate) fn encode_bounded(doc: &HistoryDocument, max_bytes: usize) -> StoreResult<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    if bytes.len() > max_bytes {
        return Err(StoreError::CapacityExceeded {
            limit_bytes: max_bytes,
            needed_bytes: bytes.len(),
        });
    }
    Ok(bytes)
}

pub(crate) fn decode(bytes: &[u8]) -> StoreResult<HistoryDocument> {
    let doc: HistoryDocument =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    if doc.version != DOCUMENT_VERSION {
        return Err(StoreError::Corrupt(format!(
            "unsupported document version {}",
            doc.version
        )));
    }
    Ok(doc)
}

pub struct FileStore {
    path: PathBuf,
    max_entries: usize,
    max_bytes: usize,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize, max_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
            max_bytes,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or invalid documents all read as empty.
    fn read_document(&self) -> HistoryDocument {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return HistoryDocument::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history: unreadable, treating as empty");
                return HistoryDocument::default();
            }
        };
        match decode(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history: invalid document, treating as empty");
                HistoryDocument::default()
            }
        }
    }

    fn write_document(&self, doc: &HistoryDocument) -> StoreResult<()> {
        let bytes = encode_bounded(doc, self.max_bytes)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), entries = doc.analyses.len(), "history: written");
        Ok(())
    }
}

impl AnalysisStore for FileStore {
    fn save(&self, snapshot: AnalysisSnapshot) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let mut doc = self.read_document();
        insert_newest(&mut doc.analyses, snapshot, self.max_entries);
        self.write_document(&doc)
    }

    fn get(&self, id: &str) -> StoreResult<Option<AnalysisSnapshot>> {
        let _guard = self.lock.lock();
        Ok(self.read_document().analyses.into_iter().find(|a| a.id == id))
    }

    fn list(&self) -> StoreResult<Vec<AnalysisSummary>> {
        let _guard = self.lock.lock();
        Ok(self.read_document().analyses.iter().map(AnalysisSnapshot::summary).collect())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        let mut doc = self.read_document();
        let before = doc.analyses.len();
        doc.analyses.retain(|a| a.id != id);
        if doc.analyses.len() == before {
            return Ok(false);
        }
        self.write_document(&doc)?;
        Ok(true)
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self.lock.lock();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
