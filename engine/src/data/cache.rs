// Memoizes loaded tables per file, reloading when the file's modification time moves.
use shared::models::RawTable;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::load_table;
use crate::error::EngineError;

struct CachedTable {
    modified: Option<SystemTime>,
    table: Arc<RawTable>,
}

pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedTable>,
}

impl DatasetCache {
    pub fn new() -> Self {
        DatasetCache {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached table for `path`, loading it on first use or when the
    /// file changed since the last load. Files without a readable modification
    /// time are always reloaded.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<Arc<RawTable>, EngineError> {
        let path = path.as_ref();
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();

        if let Some(entry) = self.entries.get(path) {
            if modified.is_some() && entry.modified == modified {
                tracing::debug!(path = %path.display(), "Dataset cache hit");
                return Ok(Arc::clone(&entry.table));
            }
        }

        tracing::debug!(path = %path.display(), "Dataset cache miss, loading");
        let table = Arc::new(load_table(path)?);
        self.entries.insert(
            path.to_path_buf(),
            CachedTable {
                modified,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drops the entry for `path`; returns whether one existed.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(path.as_ref()).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_at(file: &mut NamedTempFile, content: &str, secs: u64) {
        let f = file.as_file_mut();
        f.set_len(0).unwrap();
        f.seek(SeekFrom::Start(0)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
    }

    #[test]
    fn test_repeated_load_is_served_from_cache() {
        let mut file = NamedTempFile::new().unwrap();
        write_at(&mut file, "ano;quantidade\n2020;1\n", 1_700_000_000);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let mut file = NamedTempFile::new().unwrap();
        write_at(&mut file, "ano;quantidade\n2020;1\n", 1_700_000_000);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();

        write_at(&mut file, "ano;quantidade\n2020;1\n2021;2\n", 1_700_000_100);
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut file = NamedTempFile::new().unwrap();
        write_at(&mut file, "a;b\n1;2\n", 1_700_000_000);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        assert!(cache.invalidate(file.path()));
        assert!(!cache.invalidate(file.path()));

        let second = cache.get_or_load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_cached() {
        let mut cache = DatasetCache::new();
        let result = cache.get_or_load("/no/such/dataset.csv");
        assert!(matches!(result, Err(EngineError::Load { .. })));
        assert!(cache.is_empty());
    }
}
