//! Grid filesystem entry point
//!
//! Holds the shared store and the configured chunk size, and hands out
//! `GridFile` handles bound to both.

use log::info;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::grid::GridFile;
use crate::store::{MemoryStore, MetadataStore};

/// Factory for `GridFile` handles sharing one store.
#[derive(Clone)]
pub struct GridFs {
    store: Arc<dyn MetadataStore>,
    chunk_size: i32,
}

impl GridFs {
    pub fn new(store: Arc<dyn MetadataStore>, chunk_size: i32) -> Self {
        Self { store, chunk_size }
    }

    /// Builds a filesystem over a fresh in-memory store.
    pub fn from_config(config: &StoreConfig) -> Self {
        info!(
            "Using in-memory store (chunk size {}, {:?} endian)",
            config.chunk_size, config.byte_order
        );
        Self::new(
            Arc::new(MemoryStore::new(config.byte_order)),
            config.chunk_size,
        )
    }

    pub fn file(&self, pathname: &str) -> GridFile {
        GridFile::new(pathname, Arc::clone(&self.store), self.chunk_size)
    }

    pub fn file_in(&self, parent: &str, child: &str) -> GridFile {
        GridFile::with_parent(parent, child, Arc::clone(&self.store), self.chunk_size)
    }

    pub fn store(&self) -> &Arc<dyn MetadataStore> {
        &self.store
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FileInfo;
    use crate::metadata::ByteOrder;

    #[test]
    fn test_handles_share_store() {
        let fs = GridFs::from_config(&StoreConfig {
            chunk_size: 8192,
            byte_order: ByteOrder::Little,
        });

        assert!(fs.file("/shared").mkdir());
        assert!(fs.file_in("/shared", "child").create_file());
        assert!(fs.file("/shared/child").exists());
        assert_eq!(fs.file("/shared/child").chunk_size(), 8192);
        assert_eq!(fs.store().keys().unwrap().len(), 2);
    }
}
