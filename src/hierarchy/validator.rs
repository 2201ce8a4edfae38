//! Ancestor chain validation

use log::debug;

use crate::error::GridError;
use crate::metadata::Metadata;
use crate::path::{self, SEPARATOR};
use crate::store::{MetadataStore, PutOptions};

/// Checks that every ancestor of `path` exists and is a directory.
///
/// With `create_if_absent`, missing ancestors are written as directory records
/// using `chunk_size`. The walk is not transactional: ancestors created before
/// a later failure stay in the store.
///
/// Concurrent callers may interleave between the lookup and the write of each
/// step. Two callers creating the same directory ancestor is harmless, but a
/// caller creating a file at a path another caller is creating as an ancestor
/// directory can leave either record behind.
///
/// # Arguments
///
/// * `store` - Store holding the metadata records.
/// * `path` - Path whose ancestors are checked; the leaf itself is not.
/// * `create_if_absent` - Create missing ancestors instead of failing.
/// * `chunk_size` - Chunk size stamped on created directory records.
///
/// # Returns
///
/// * `Ok(())` once every ancestor has been validated or created.
/// * `GridError::MalformedPath` for an empty path.
/// * `GridError::AncestorIsFile` when an ancestor exists as a file.
/// * `GridError::AncestorMissing` when an ancestor is absent and may not be created.
/// * `GridError::Store` when the store fails.
pub fn ensure_ancestors(
    store: &dyn MetadataStore,
    path: &str,
    create_if_absent: bool,
    chunk_size: i32,
) -> Result<(), GridError> {
    let path = path::trim(path);
    if path.is_empty() {
        return Err(GridError::MalformedPath(path.to_string()));
    }

    // A bare name such as "data.txt" has no ancestors to check.
    let Some(segments) = path::components(path, 0) else {
        return Ok(());
    };
    if segments.len() <= 1 {
        return Ok(());
    }

    let mut prefix = String::with_capacity(path.len());
    if path.starts_with(SEPARATOR) {
        prefix.push(SEPARATOR);
    }

    for (i, segment) in segments[..segments.len() - 1].iter().enumerate() {
        if i > 0 {
            prefix.push(SEPARATOR);
        }
        prefix.push_str(segment);

        match store.get(&prefix)? {
            Some(meta) if meta.is_file() => {
                return Err(GridError::AncestorIsFile {
                    path: path.to_string(),
                    ancestor: prefix,
                });
            }
            Some(_) => {}
            None if create_if_absent => {
                store.put(
                    &prefix,
                    Metadata::directory(chunk_size),
                    PutOptions::unconditional(),
                )?;
                debug!("Created missing directory {} for {}", prefix, path);
            }
            None => {
                return Err(GridError::AncestorMissing {
                    path: path.to_string(),
                    ancestor: prefix,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::metadata::EntryFlags;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    const CHUNK: i32 = 4000;

    fn store_with(entries: &[(&str, EntryFlags)]) -> MemoryStore {
        let store = MemoryStore::default();
        for (key, flags) in entries {
            store
                .put(key, Metadata::new(0, 1, CHUNK, *flags), PutOptions::unconditional())
                .unwrap();
        }
        store
    }

    // Accepts reads, fails every write
    struct RejectingStore;

    impl MetadataStore for RejectingStore {
        fn get(&self, _key: &str) -> Result<Option<Metadata>, StoreError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: Metadata, _options: PutOptions) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("write quorum lost".into()))
        }

        fn keys(&self) -> Result<HashSet<String>, StoreError> {
            Ok(HashSet::new())
        }
    }

    fn sorted_keys(store: &MemoryStore) -> Vec<String> {
        let mut keys: Vec<String> = store.keys().unwrap().into_iter().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_single_segment_needs_no_ancestors() {
        let store = MemoryStore::default();
        assert!(ensure_ancestors(&store, "leaf.txt", false, CHUNK).is_ok());
        assert!(ensure_ancestors(&store, "/leaf.txt", false, CHUNK).is_ok());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_root_needs_no_ancestors() {
        let store = MemoryStore::default();
        assert!(ensure_ancestors(&store, "/", false, CHUNK).is_ok());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_empty_path_is_malformed() {
        let store = MemoryStore::default();
        assert!(matches!(
            ensure_ancestors(&store, "  ", true, CHUNK),
            Err(GridError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_existing_ancestors_pass() {
        let store = store_with(&[("/a", EntryFlags::DIR), ("/a/b", EntryFlags::DIR)]);
        assert!(ensure_ancestors(&store, "/a/b/c", false, CHUNK).is_ok());
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_missing_ancestor_without_create() {
        let store = store_with(&[("/a", EntryFlags::DIR)]);
        match ensure_ancestors(&store, "/a/b/c", false, CHUNK) {
            Err(GridError::AncestorMissing { ancestor, .. }) => assert_eq!(ancestor, "/a/b"),
            other => panic!("expected missing ancestor, got {:?}", other),
        }
        assert_eq!(sorted_keys(&store), vec!["/a"]);
    }

    #[test]
    fn test_missing_ancestors_created() {
        let store = MemoryStore::default();
        ensure_ancestors(&store, "/a/b/c", true, CHUNK).unwrap();

        assert_eq!(sorted_keys(&store), vec!["/a", "/a/b"]);
        for key in ["/a", "/a/b"] {
            let meta = store.get(key).unwrap().unwrap();
            assert!(meta.is_directory());
            assert_eq!(meta.chunk_size(), CHUNK);
            assert_eq!(meta.length(), 0);
        }
    }

    #[test]
    fn test_relative_ancestors_stay_relative() {
        let store = MemoryStore::default();
        ensure_ancestors(&store, "a/b/c", true, CHUNK).unwrap();
        assert_eq!(sorted_keys(&store), vec!["a", "a/b"]);
    }

    #[test]
    fn test_file_ancestor_conflict() {
        let store = store_with(&[("/a", EntryFlags::FILE)]);
        match ensure_ancestors(&store, "/a/b", true, CHUNK) {
            Err(GridError::AncestorIsFile { path, ancestor }) => {
                assert_eq!(path, "/a/b");
                assert_eq!(ancestor, "/a");
            }
            other => panic!("expected file conflict, got {:?}", other),
        }
        assert_eq!(sorted_keys(&store), vec!["/a"]);
    }

    #[test]
    fn test_partial_creation_survives_conflict() {
        let store = store_with(&[("/a/b", EntryFlags::FILE)]);
        let result = ensure_ancestors(&store, "/a/b/c", true, CHUNK);

        assert!(matches!(result, Err(GridError::AncestorIsFile { .. })));
        // "/a" was created before the conflict at "/a/b" and is not rolled back.
        assert_eq!(sorted_keys(&store), vec!["/a", "/a/b"]);
        assert!(store.get("/a").unwrap().unwrap().is_directory());
    }

    #[test]
    fn test_ancestor_with_both_flags_blocks() {
        let store = store_with(&[("/a", EntryFlags::FILE | EntryFlags::DIR)]);
        assert!(matches!(
            ensure_ancestors(&store, "/a/b", false, CHUNK),
            Err(GridError::AncestorIsFile { .. })
        ));
    }

    #[test]
    fn test_ancestor_with_no_flags_passes() {
        let store = store_with(&[("/a", EntryFlags::empty())]);
        assert!(ensure_ancestors(&store, "/a/b", false, CHUNK).is_ok());
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = MemoryStore::default();
        store.insert_raw("/a", vec![0xff]).unwrap();
        assert!(matches!(
            ensure_ancestors(&store, "/a/b", true, CHUNK),
            Err(GridError::Store(_))
        ));
    }

    #[test]
    fn test_ancestor_put_failure_propagates() {
        match ensure_ancestors(&RejectingStore, "/a/b", true, CHUNK) {
            Err(GridError::Store(StoreError::Unavailable(msg))) => {
                assert_eq!(msg, "write quorum lost")
            }
            other => panic!("expected store failure, got {:?}", other),
        }
        // Nothing is written when ancestors only need checking.
        assert!(matches!(
            ensure_ancestors(&RejectingStore, "/a/b", false, CHUNK),
            Err(GridError::AncestorMissing { .. })
        ));
    }
}
