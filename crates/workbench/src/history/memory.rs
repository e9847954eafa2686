//! In-process store with the same retention and capacity rules as
//! [`FileStore`](super::FileStore).

use parking_lot::Mutex;

use super::error::StoreResult;
use super::model::{AnalysisSnapshot, AnalysisSummary, HistoryDocument};
use super::store::{encode_bounded, insert_newest, AnalysisStore};

pub struct MemoryStore {
    doc: Mutex<HistoryDocument>,
    max_entries: usize,
    max_bytes: usize,
}

impl MemoryStore {
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        Self {
            doc: Mutex::new(HistoryDocument::default()),
            max_entries,
            max_bytes,
        }
    }
}

impl AnalysisStore for MemoryStore {
    fn save(&self, snapshot: AnalysisSnapshot) -> StoreResult<()> {
        let mut doc = self.doc.lock();
        let mut next = doc.clone();
        insert_newest(&mut next.analyses, snapshot, self.max_entries);
        encode_bounded(&next, self.max_bytes)?;
        *doc = next;
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<AnalysisSnapshot>> {
        Ok(self.doc.lock().analyses.iter().find(|a| a.id == id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<AnalysisSummary>> {
        Ok(self.doc.lock().analyses.iter().map(AnalysisSnapshot::summary).collect())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut doc = self.doc.lock();
        let before = doc.analyses.len();
        doc.analyses.retain(|a| a.id != id);
        Ok(doc.analyses.len() != before)
    }

    fn clear(&self) -> StoreResult<()> {
        self.doc.lock().analyses.clear();
        Ok(())
    }
}
