//! Metadata records
//!
//! The fixed-shape value stored for every file and directory key, and its
//! 17-byte binary layout.

pub mod codec;
pub mod types;

pub use codec::{ByteOrder, ENCODED_LEN, MetadataCodec};
pub use types::{EntryFlags, Metadata, current_time_millis};
