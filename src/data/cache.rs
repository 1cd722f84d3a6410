use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::derive::derive;
use super::error::{DashboardError, Result};
use super::loader::load_file;
use super::model::EnrichedTable;

// ---------------------------------------------------------------------------
// DatasetCache – compute once, rebuild when the source file changes
// ---------------------------------------------------------------------------

/// Holds the enriched table for one source file.
///
/// The table is loaded and derived on the first [`get`](Self::get) and reused
/// until the file's modification time or length changes, or
/// [`invalidate`](Self::invalidate) is called. A rebuild swaps in a new `Arc` in one assignment, so holders of
/// the previous table keep a complete copy of it.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    stamp: SourceStamp,
    table: Arc<EnrichedTable>,
}

/// What identifies one version of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entry: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The currently cached table, without touching the file system.
    #[cfg(test)]
    pub fn cached(&self) -> Option<Arc<EnrichedTable>> {
        self.entry.as_ref().map(|e| Arc::clone(&e.table))
    }

    /// Drop the cached table; the next `get` rebuilds it.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the enriched table, rebuilding it if the source changed.
    ///
    /// On error the cache is left empty.
    pub fn get(&mut self) -> Result<Arc<EnrichedTable>> {
        let stamp = match std::fs::metadata(&self.path) {
            Ok(meta) => SourceStamp {
                modified: meta.modified().ok(),
                len: meta.len(),
            },
            Err(source) => {
                self.entry = None;
                return Err(DashboardError::SourceNotFound {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if let Some(entry) = &self.entry {
            if entry.stamp == stamp {
                return Ok(Arc::clone(&entry.table));
            }
            log::info!("{} changed on disk, reloading", self.path.display());
        }

        self.entry = None;
        let table = Arc::new(load_and_derive(&self.path)?);
        self.entry = Some(CacheEntry {
            stamp,
            table: Arc::clone(&table),
        });
        Ok(table)
    }
}

fn load_and_derive(path: &Path) -> Result<EnrichedTable> {
    let raw = load_file(path)?;
    let table = derive(&raw)?;
    log::info!(
        "Loaded {} matches from {} with columns {:?}, mastery range {:?}",
        raw.len(),
        path.display(),
        raw.columns,
        table.mastery_bounds
    );
    if table.unknown_tier_rows > 0 {
        log::warn!(
            "{} rows have a tier outside IRON..CHALLENGER and are left out of tier charts",
            table.unknown_tier_rows
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const CSV: &str = "win,duration,mastery_level,solo_tier\n\
                       True,1800,15,GOLD\n\
                       False,2400,25,GOLD\n";

    fn bump_mtime(path: &Path) {
        let f = std::fs::File::options().write(true).open(path).unwrap();
        f.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
    }

    #[test]
    fn reuses_table_while_file_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new(&path);
        assert!(cache.cached().is_none());
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn rebuilds_after_file_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new(&path);
        let old = cache.get().unwrap();

        std::fs::write(&path, format!("{CSV}True,1500,70,IRON\n")).unwrap();
        bump_mtime(&path);

        let new = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(old.len(), 2);
        assert_eq!(new.len(), 3);
        assert_eq!(new.bins.edges()[6], 71);
    }

    #[test]
    fn rewrite_with_same_mtime_is_detected_by_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new(&path);
        let old = cache.get().unwrap();
        let mtime = std::fs::metadata(&path).unwrap().modified().unwrap();

        std::fs::write(&path, format!("{CSV}True,1500,70,IRON\n")).unwrap();
        let f = std::fs::File::options().write(true).open(&path).unwrap();
        f.set_modified(mtime).unwrap();
        drop(f);

        let new = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(new.len(), 3);
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new(&path);
        let first = cache.get().unwrap();
        cache.invalidate();
        assert!(cache.cached().is_none());
        let second = cache.get().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_clears_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = DatasetCache::new(&path);
        cache.get().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            cache.get(),
            Err(DashboardError::SourceNotFound { .. })
        ));
        assert!(cache.cached().is_none());
    }

    #[test]
    fn schema_errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        std::fs::write(&path, "win,duration,solo_tier\nTrue,1800,GOLD\n").unwrap();

        let mut cache = DatasetCache::new(&path);
        assert!(matches!(
            cache.get(),
            Err(DashboardError::InputSchema { .. })
        ));
        assert!(cache.cached().is_none());
    }
}
