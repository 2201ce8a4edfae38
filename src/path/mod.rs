//! Path handling
//!
//! Derives the directory hierarchy purely from the structure of path strings.

mod operations;

pub use operations::{
    ROOT, SEPARATOR, components, is_direct_child_of, join, last_segment, normalize, parent_of,
    trim,
};
