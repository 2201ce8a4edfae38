//! Key-value store contract
//!
//! The hierarchy layer depends on nothing but point lookups, unconditional
//! upserts and a full key enumeration. Replication, versioning and eviction
//! belong to the implementation behind this trait.

pub mod memory;

use std::collections::HashSet;
use std::time::Duration;

use crate::error::StoreError;
use crate::metadata::Metadata;

pub use memory::MemoryStore;

/// Optimistic-concurrency constraint applied to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionConstraint {
    Unconstrained,
    Exact(u64),
}

/// Expiry applied to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToLive {
    Never,
    After(Duration),
}

/// Write mode of a single put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutOptions {
    pub version: VersionConstraint,
    pub ttl: TimeToLive,
}

impl PutOptions {
    /// Overwrite whatever is there, with no version check and no expiry.
    ///
    /// Every write issued by this crate uses this mode.
    pub const fn unconditional() -> Self {
        Self {
            version: VersionConstraint::Unconstrained,
            ttl: TimeToLive::Never,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        *self == Self::unconditional()
    }
}

/// Path-keyed metadata store.
///
/// Implementations may block; callers pass that behavior through unchanged.
pub trait MetadataStore: Send + Sync {
    /// Point lookup. `Ok(None)` when no record exists for `key`.
    fn get(&self, key: &str) -> Result<Option<Metadata>, StoreError>;

    /// Upsert `value` under `key` using the given write mode.
    fn put(&self, key: &str, value: Metadata, options: PutOptions) -> Result<(), StoreError>;

    /// Snapshot of every key currently stored. No isolation from concurrent writers.
    fn keys(&self) -> Result<HashSet<String>, StoreError>;
}
