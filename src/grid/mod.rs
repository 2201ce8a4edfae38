//! Path-hierarchy facade
//!
//! Path-addressed handles over a flat metadata store, with the boolean
//! success contract of a regular file API.

pub mod file;
pub mod filesystem;

pub use file::GridFile;
pub use filesystem::GridFs;

/// Read-only view of a path-addressed entry.
pub trait FileInfo {
    fn exists(&self) -> bool;
    fn is_directory(&self) -> bool;
    fn is_file(&self) -> bool;
    /// Length in bytes, or 0 when the entry does not exist.
    fn length(&self) -> u64;
    /// Modification time in epoch milliseconds, or 0 when the entry does not exist.
    fn last_modified(&self) -> i64;
}
