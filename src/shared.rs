use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::{Index, UrlCount};
use crate::searcher::rank;

/// Thread-safe handle around an [`Index`]: writes (`incorporate`, `load`)
/// take the writer lock for their full duration, reads (`lookup`, `search`)
/// share a read lock. Clones observe each other's writes.
#[derive(Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<Index>>,
}

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        SharedIndex {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn incorporate(&self, url: &str, counts: &[(String, u32)]) -> Result<bool> {
        let mut index = self.inner.write();
        index.incorporate(url, counts.iter().map(|(w, c)| (w.as_str(), *c)))
    }

    pub fn lookup(&self, word: &str) -> Vec<UrlCount> {
        self.inner.read().lookup(word)
    }

    pub fn search(&self, terms: &str) -> Vec<String> {
        rank(&self.inner.read(), terms)
    }

    pub fn document_count(&self) -> u32 {
        self.inner.read().document_count()
    }

    pub fn save<P: AsRef<Path>>(&self, prefix: P) -> Result<()> {
        self.inner.read().save(prefix)
    }

    pub fn load<P: AsRef<Path>>(&self, prefix: P) -> Result<()> {
        self.inner.write().load(prefix)
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(Index::new())
    }
}
