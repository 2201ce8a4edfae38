//! In-memory store
//!
//! Keeps every record in its encoded 17-byte form, the same shape a
//! replicated cache would hold on the wire.

use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::metadata::{ByteOrder, Metadata, MetadataCodec};
use crate::store::{MetadataStore, PutOptions};

/// Thread-safe map from path to encoded metadata.
#[derive(Debug, Default)]
pub struct MemoryStore {
    codec: MetadataCodec,
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            codec: MetadataCodec::new(byte_order),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn codec(&self) -> MetadataCodec {
        self.codec
    }

    /// Stores raw bytes under `key`, bypassing the codec.
    pub fn insert_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.write()?.insert(key.to_string(), bytes);
        Ok(())
    }

    /// Returns the raw bytes stored under `key`.
    pub fn raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl MetadataStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Metadata>, StoreError> {
        let entries = self.read()?;
        match entries.get(key) {
            Some(bytes) => self
                .codec
                .decode(bytes)
                .map(Some)
                .map_err(|reason| StoreError::Corrupt {
                    key: key.to_string(),
                    reason,
                }),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: Metadata, options: PutOptions) -> Result<(), StoreError> {
        if !options.is_unconditional() {
            return Err(StoreError::Unsupported(format!(
                "memory store only accepts unconditional puts, got {:?}",
                options
            )));
        }

        let bytes = self.codec.encode(&value).to_vec();
        self.write()?.insert(key.to_string(), bytes);
        debug!("Stored {} -> {}", key, value);
        Ok(())
    }

    fn keys(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.read()?.keys().cloned().collect())
    }
}
