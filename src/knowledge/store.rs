use std::path::Path;
use std::sync::{Arc, RwLock};

use super::types::KnowledgeError;
use super::KnowledgeBase;

/// Holds the current knowledge snapshot.
///
/// Readers clone the inner `Arc` and work against that snapshot for the
/// whole call; a reload validates the new value first and then swaps the
/// pointer, so no reader ever observes a half-updated knowledge base.
pub struct KnowledgeStore {
    current: RwLock<Arc<KnowledgeBase>>,
}

impl KnowledgeStore {
    pub fn new(knowledge: KnowledgeBase) -> Result<Self, KnowledgeError> {
        knowledge.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(knowledge)),
        })
    }

    /// Store seeded with the built-in data set.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        Self::new(KnowledgeBase::builtin())
    }

    /// Current snapshot. Cheap: one `Arc` clone under a read lock.
    pub fn snapshot(&self) -> Result<Arc<KnowledgeBase>, KnowledgeError> {
        let guard = self.current.read().map_err(|_| KnowledgeError::LockFailed)?;
        Ok(Arc::clone(&guard))
    }

    /// Current snapshot, also when a writer panicked while holding the lock.
    /// A swap is a single pointer store of an already validated value, so a
    /// poisoned lock still guards a complete snapshot.
    pub fn current(&self) -> Arc<KnowledgeBase> {
        let guard = self.current.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Knowledge store lock poisoned, serving last snapshot");
            poisoned.into_inner()
        });
        Arc::clone(&guard)
    }

    /// Validate `knowledge` and make it the current snapshot.
    /// On validation failure the previous snapshot stays in place.
    pub fn replace(&self, knowledge: KnowledgeBase) -> Result<(), KnowledgeError> {
        knowledge.validate()?;
        let next = Arc::new(knowledge);
        let mut guard = self.current.write().map_err(|_| KnowledgeError::LockFailed)?;
        *guard = next;
        tracing::info!(
            symptoms = guard.symptoms.len(),
            emergencies = guard.emergencies.len(),
            "Knowledge snapshot replaced"
        );
        Ok(())
    }

    /// Load a JSON knowledge file and swap it in.
    pub fn reload_from(&self, path: &Path) -> Result<(), KnowledgeError> {
        let knowledge = KnowledgeBase::load(path)?;
        self.replace(knowledge)
    }
}
