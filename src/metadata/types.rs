//! Metadata record types

use std::fmt;
use std::ops::BitOr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Type bits of a stored entry.
///
/// The two bits are independent. Records written by this crate carry exactly
/// one of them, but a record decoded from the store may carry both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntryFlags(u8);

impl EntryFlags {
    pub const FILE: EntryFlags = EntryFlags(1 << 0);
    pub const DIR: EntryFlags = EntryFlags(1 << 1);

    pub const fn empty() -> Self {
        EntryFlags(0)
    }

    /// Wraps a raw flag byte without validating it.
    pub const fn from_bits(bits: u8) -> Self {
        EntryFlags(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub const fn contains(self, other: EntryFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for EntryFlags {
    type Output = EntryFlags;

    fn bitor(self, rhs: EntryFlags) -> EntryFlags {
        EntryFlags(self.0 | rhs.0)
    }
}

/// Attributes stored for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    length: i32,
    modification_time: i64,
    chunk_size: i32,
    flags: EntryFlags,
}

impl Metadata {
    pub fn new(length: i32, modification_time: i64, chunk_size: i32, flags: EntryFlags) -> Self {
        Self {
            length,
            modification_time,
            chunk_size,
            flags,
        }
    }

    /// An empty file record stamped with the current time.
    pub fn file(chunk_size: i32) -> Self {
        Self::new(0, current_time_millis(), chunk_size, EntryFlags::FILE)
    }

    /// A directory record stamped with the current time.
    pub fn directory(chunk_size: i32) -> Self {
        Self::new(0, current_time_millis(), chunk_size, EntryFlags::DIR)
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Size in bytes; only meaningful for files.
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Milliseconds since the Unix epoch.
    pub fn modification_time(&self) -> i64 {
        self.modification_time
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn flags(&self) -> EntryFlags {
        self.flags
    }

    pub fn is_file(&self) -> bool {
        self.flags.contains(EntryFlags::FILE)
    }

    pub fn is_directory(&self) -> bool {
        self.flags.contains(EntryFlags::DIR)
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn set_length(&mut self, length: i32) {
        self.length = length;
    }

    pub fn set_modification_time(&mut self, modification_time: i64) {
        self.modification_time = modification_time;
    }

    fn type_name(&self) -> &'static str {
        if self.is_file() {
            "file"
        } else if self.is_directory() {
            "dir"
        } else {
            "n/a"
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        if self.is_file() {
            write!(
                f,
                ", len={}, chunk_size={}",
                print_bytes(self.length as i64),
                self.chunk_size
            )?;
        }
        write!(f, ", mod_time={}", self.modification_time)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn current_time_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis() as i64)
        .unwrap_or(0)
}

/// Formats a byte count with a decimal unit suffix.
fn print_bytes(bytes: i64) -> String {
    let value = bytes as f64;
    if bytes < 1_000 {
        format!("{}b", bytes)
    } else if bytes < 1_000_000 {
        format!("{:.2}KB", value / 1_000.0)
    } else if bytes < 1_000_000_000 {
        format!("{:.2}MB", value / 1_000_000.0)
    } else {
        format!("{:.2}GB", value / 1_000_000_000.0)
    }
}
