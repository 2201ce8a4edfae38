//! Grid filesystem
//!
//! A POSIX-like file and directory hierarchy layered over a flat key-value
//! store that maps normalized paths to fixed-size metadata records.

pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod hierarchy;
pub mod metadata;
pub mod path;
pub mod protocol;
pub mod server;
pub mod store;

pub use config::GridConfig;
pub use error::{GridError, StoreError};
pub use grid::{FileInfo, GridFile, GridFs};
pub use metadata::{ByteOrder, EntryFlags, Metadata, MetadataCodec};
pub use server::Server;
pub use store::{MemoryStore, MetadataStore, PutOptions};
