//! Binary layout of a metadata record
//!
//! Fields are written in a fixed order: `length` (i32), `modification_time`
//! (i64), `chunk_size` (i32), `flags` (u8). 17 bytes in total. The byte order
//! of the integer fields is configurable so records can match an existing
//! store's convention.

use serde::Deserialize;

use crate::error::CodecError;
use crate::metadata::types::{EntryFlags, Metadata};

/// Size of an encoded record in bytes.
pub const ENCODED_LEN: usize = 17;

/// Byte order of the integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Network order, as written by Java's `DataOutputStream`.
    #[default]
    Big,
    Little,
}

/// Encodes and decodes metadata records in a fixed byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataCodec {
    byte_order: ByteOrder,
}

impl MetadataCodec {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn encode(&self, meta: &Metadata) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];

        let (length, mod_time, chunk_size) = match self.byte_order {
            ByteOrder::Big => (
                meta.length().to_be_bytes(),
                meta.modification_time().to_be_bytes(),
                meta.chunk_size().to_be_bytes(),
            ),
            ByteOrder::Little => (
                meta.length().to_le_bytes(),
                meta.modification_time().to_le_bytes(),
                meta.chunk_size().to_le_bytes(),
            ),
        };

        out[0..4].copy_from_slice(&length);
        out[4..12].copy_from_slice(&mod_time);
        out[12..16].copy_from_slice(&chunk_size);
        out[16] = meta.flags().bits();
        out
    }

    /// Decodes a record from the first 17 bytes of `bytes`.
    ///
    /// Any flag byte is accepted, including ones with both or neither type bit.
    pub fn decode(&self, bytes: &[u8]) -> Result<Metadata, CodecError> {
        if bytes.len() < ENCODED_LEN {
            return Err(CodecError::Truncated {
                expected: ENCODED_LEN,
                actual: bytes.len(),
            });
        }

        let length: [u8; 4] = field(bytes, 0);
        let mod_time: [u8; 8] = field(bytes, 4);
        let chunk_size: [u8; 4] = field(bytes, 12);

        let meta = match self.byte_order {
            ByteOrder::Big => Metadata::new(
                i32::from_be_bytes(length),
                i64::from_be_bytes(mod_time),
                i32::from_be_bytes(chunk_size),
                EntryFlags::from_bits(bytes[16]),
            ),
            ByteOrder::Little => Metadata::new(
                i32::from_le_bytes(length),
                i64::from_le_bytes(mod_time),
                i32::from_le_bytes(chunk_size),
                EntryFlags::from_bits(bytes[16]),
            ),
        };

        Ok(meta)
    }
}

fn field<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[at..at + N]);
    buf
}
