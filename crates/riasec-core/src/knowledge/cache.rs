//! Read-through knowledge snapshot cache keyed by the tables' content hash.

use std::sync::{Arc, RwLock};

use super::loader;
use super::model::{DuplicateMajorPolicy, KnowledgeBase};
use super::source::RawTables;
use super::KnowledgeSource;
use crate::error::KnowledgeResult;

/// Holds the current [`KnowledgeBase`] and rebuilds it when the source tables change.
///
/// Every [`snapshot`](Self::snapshot) call re-reads the raw tables and compares their
/// blake3 hash with the cached snapshot. A new snapshot is fully built before it is
/// swapped in, so concurrent readers only ever see complete tables.
pub struct KnowledgeCache {
    source: Arc<dyn KnowledgeSource>,
    policy: DuplicateMajorPolicy,
    current: RwLock<Option<Arc<KnowledgeBase>>>,
}

impl KnowledgeCache {
    pub fn new(source: Arc<dyn KnowledgeSource>, policy: DuplicateMajorPolicy) -> Self {
        Self {
            source,
            policy,
            current: RwLock::new(None),
        }
    }

    /// Returns a snapshot matching the tables as they are now. A load error is returned
    /// as-is; the previous snapshot is not served for tables that no longer match it.
    pub fn snapshot(&self) -> KnowledgeResult<Arc<KnowledgeBase>> {
        let tables = RawTables::read(self.source.as_ref())?;
        let hash = tables.content_hash();
        if let Some(kb) = self.current().filter(|kb| kb.content_hash() == hash) {
            return Ok(kb);
        }
        self.rebuild(&tables)
    }

    /// Rebuilds unconditionally from the source.
    pub fn reload(&self) -> KnowledgeResult<Arc<KnowledgeBase>> {
        let tables = RawTables::read(self.source.as_ref())?;
        self.rebuild(&tables)
    }

    /// Last successfully built snapshot, without touching the source.
    pub fn current(&self) -> Option<Arc<KnowledgeBase>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn rebuild(&self, tables: &RawTables) -> KnowledgeResult<Arc<KnowledgeBase>> {
        let kb = Arc::new(loader::build(tables, self.policy)?);
        let previous = {
            let mut guard = match self.current.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.replace(Arc::clone(&kb))
        };
        tracing::info!(
            target: "riasec::knowledge",
            source = self.source.name(),
            hash = %kb.content_hash(),
            previous = previous.as_ref().map(|p| p.content_hash()).unwrap_or("none"),
            "knowledge snapshot swapped in"
        );
        Ok(kb)
    }
}
