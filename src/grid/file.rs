//! Module `file`
//!
//! Defines `GridFile`, a handle to a single path in the grid namespace.
//! Each mutating operation comes in two forms: `try_*` returns the detailed
//! `GridError`, and the plain form logs it and collapses it to a boolean.

use log::info;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::GridError;
use crate::error::handlers::handle_error;
use crate::grid::FileInfo;
use crate::hierarchy::ensure_ancestors;
use crate::metadata::Metadata;
use crate::path;
use crate::store::{MetadataStore, PutOptions};

/// Handle to a file or directory identified by its normalized path.
///
/// Creating a handle does not touch the store.
#[derive(Clone)]
pub struct GridFile {
    store: Arc<dyn MetadataStore>,
    name: String,
    chunk_size: i32,
}

impl GridFile {
    pub fn new(pathname: &str, store: Arc<dyn MetadataStore>, chunk_size: i32) -> Self {
        Self {
            store,
            name: path::normalize(pathname),
            chunk_size,
        }
    }

    /// Handle to `child` inside the directory `parent`.
    pub fn with_parent(
        parent: &str,
        child: &str,
        store: Arc<dyn MetadataStore>,
        chunk_size: i32,
    ) -> Self {
        Self {
            store,
            name: path::join(parent, child),
            chunk_size,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    /// The full normalized path, which is also the store key.
    pub fn path(&self) -> &str {
        &self.name
    }

    /// The last segment of the path.
    pub fn name(&self) -> &str {
        path::last_segment(&self.name)
    }

    pub fn parent(&self) -> Option<&str> {
        path::parent_of(&self.name)
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Returns the stored record, if any.
    pub fn metadata(&self) -> Result<Option<Metadata>, GridError> {
        Ok(self.store.get(&self.name)?)
    }

    // --------------------
    // Creation
    // --------------------

    /// Creates an empty file. Its parent directories must already exist.
    pub fn try_create_file(&self) -> Result<(), GridError> {
        self.create(false, Metadata::file(self.chunk_size))
    }

    pub fn create_file(&self) -> bool {
        self.report("create file", self.try_create_file())
    }

    /// Creates a directory. Its parent directories must already exist.
    pub fn try_mkdir(&self) -> Result<(), GridError> {
        self.create(false, Metadata::directory(self.chunk_size))
    }

    pub fn mkdir(&self) -> bool {
        self.report("mkdir", self.try_mkdir())
    }

    /// Creates a directory along with any missing parent directories.
    ///
    /// Parents created before a failure are left in place.
    pub fn try_mkdirs(&self) -> Result<(), GridError> {
        self.create(true, Metadata::directory(self.chunk_size))
    }

    pub fn mkdirs(&self) -> bool {
        self.report("mkdirs", self.try_mkdirs())
    }

    fn create(&self, create_parents: bool, record: Metadata) -> Result<(), GridError> {
        if self.store.get(&self.name)?.is_some() {
            return Err(GridError::AlreadyExists(self.name.clone()));
        }

        ensure_ancestors(
            self.store.as_ref(),
            &self.name,
            create_parents,
            self.chunk_size,
        )?;

        self.store
            .put(&self.name, record, PutOptions::unconditional())?;
        info!("Created {} ({})", self.name, record);
        Ok(())
    }

    fn report(&self, operation: &str, result: Result<(), GridError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                handle_error(operation, &self.name, &e);
                false
            }
        }
    }

    // --------------------
    // Listing
    // --------------------

    /// Returns the full paths of all direct children.
    ///
    /// Scans every key in the store, so the cost grows with the store rather
    /// than with the directory.
    pub fn try_list(&self) -> Result<HashSet<String>, GridError> {
        let keys = self.store.keys()?;
        Ok(keys
            .into_iter()
            .filter(|key| path::is_direct_child_of(&self.name, key))
            .collect())
    }

    /// Like `try_list`, but `None` when the store cannot be enumerated.
    pub fn list(&self) -> Option<HashSet<String>> {
        match self.try_list() {
            Ok(children) => Some(children),
            Err(e) => {
                handle_error("list", &self.name, &e);
                None
            }
        }
    }

    /// Names of the direct children, sorted.
    pub fn list_names(&self) -> Option<Vec<String>> {
        let mut names: Vec<String> = self
            .list()?
            .iter()
            .map(|child| path::last_segment(child).to_string())
            .collect();
        names.sort();
        Some(names)
    }

    fn lookup(&self) -> Option<Metadata> {
        match self.store.get(&self.name) {
            Ok(meta) => meta,
            Err(e) => {
                handle_error("lookup", &self.name, &GridError::Store(e));
                None
            }
        }
    }
}

impl FileInfo for GridFile {
    fn exists(&self) -> bool {
        self.lookup().is_some()
    }

    fn is_directory(&self) -> bool {
        self.lookup().is_some_and(|meta| meta.is_directory())
    }

    fn is_file(&self) -> bool {
        self.lookup().is_some_and(|meta| meta.is_file())
    }

    fn length(&self) -> u64 {
        self.lookup()
            .map(|meta| meta.length().max(0) as u64)
            .unwrap_or(0)
    }

    fn last_modified(&self) -> i64 {
        self.lookup()
            .map(|meta| meta.modification_time())
            .unwrap_or(0)
    }
}

impl fmt::Debug for GridFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridFile")
            .field("name", &self.name)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl fmt::Display for GridFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
