//! Time-bounded catalog cache.
//!
//! Scanning walks every album directory, which is cheap for a small tree but
//! pointless to repeat on every request. [`CatalogCache`] keeps the last
//! catalog for a fixed time-to-live and rescans once it has gone stale.
//!
//! # Design
//!
//! - **Snapshot replacement**: a refresh builds a complete new [`Catalog`]
//!   and only then swaps the shared `Arc`. Readers see either the old
//!   catalog or the new one, never a partial one.
//! - **No lock during scans**: the `RwLock` guards only the snapshot. Two
//!   callers that both see a stale snapshot may both rescan; the later
//!   store wins. Both results describe the same tree, so this costs a
//!   redundant scan and nothing else.
//! - **Identity on hits**: within the TTL, [`CatalogCache::get`] returns
//!   the same `Arc`, so `Arc::ptr_eq` tells a hit from a rebuild.
//!
//! The clock reading is a parameter of [`CatalogCache::get_at`], which lets
//! tests step past the TTL without sleeping.

use crate::scan::{ExtensionFilter, scan};
use crate::types::Catalog;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Catalogs older than this are rescanned.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct Snapshot {
    scanned_at: Instant,
    catalog: Arc<Catalog>,
}

/// Memoizes [`scan`] results for one image root.
#[derive(Debug)]
pub struct CatalogCache {
    root: PathBuf,
    filter: ExtensionFilter,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CatalogCache {
    /// Create a cache that has never scanned.
    pub fn new(root: impl Into<PathBuf>, filter: ExtensionFilter, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            filter,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current catalog, rescanning if it is missing or stale.
    pub fn get(&self) -> Arc<Catalog> {
        self.get_at(Instant::now())
    }

    /// [`get`](Self::get) with an explicit clock reading.
    pub fn get_at(&self, now: Instant) -> Arc<Catalog> {
        if let Some(catalog) = self.fresh_at(now) {
            debug!(root = %self.root.display(), "catalog cache hit");
            return catalog;
        }

        debug!(root = %self.root.display(), "catalog cache miss, rescanning");
        let catalog = Arc::new(scan(&self.root, &self.filter));

        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *snapshot = Some(Snapshot {
            scanned_at: now,
            catalog: Arc::clone(&catalog),
        });
        catalog
    }

    /// Drop the cached catalog so the next `get` rescans.
    pub fn invalidate(&self) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *snapshot = None;
    }

    /// Whether a `get` at `now` would rescan.
    pub fn is_stale_at(&self, now: Instant) -> bool {
        self.fresh_at(now).is_none()
    }

    /// The cached catalog if one exists and is no older than the TTL.
    fn fresh_at(&self, now: Instant) -> Option<Arc<Catalog>> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = snapshot.as_ref()?;
        let age = now.saturating_duration_since(snapshot.scanned_at);
        (age <= self.ttl).then(|| Arc::clone(&snapshot.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn cache_for(root: &Path) -> CatalogCache {
        CatalogCache::new(root, ExtensionFilter::default(), DEFAULT_TTL)
    }

    #[test]
    fn default_ttl_is_five_seconds() {
        assert_eq!(DEFAULT_TTL, Duration::from_secs(5));
    }

    #[test]
    fn never_scanned_is_stale() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_for(tmp.path());
        assert!(cache.is_stale_at(Instant::now()));
    }

    #[test]
    fn hit_within_ttl_returns_same_arc() {
        let tmp = setup_fixtures();
        let cache = cache_for(tmp.path());
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        let second = cache.get_at(t0 + Duration::from_secs(2));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn hit_ignores_changes_until_ttl_expires() {
        let tmp = setup_fixtures();
        let cache = cache_for(tmp.path());
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        write_album(tmp.path(), "New", "Album", &["a.jpg"]);

        let within = cache.get_at(t0 + DEFAULT_TTL);
        assert!(within.find_category("New").is_none());

        let after = cache.get_at(t0 + DEFAULT_TTL + Duration::from_millis(1));
        assert!(!Arc::ptr_eq(&first, &after));
        assert!(after.find_category("New").is_some());
    }

    #[test]
    fn rescan_of_unchanged_tree_is_equal() {
        let tmp = setup_fixtures();
        let cache = cache_for(tmp.path());
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        let second = cache.get_at(t0 + Duration::from_secs(6));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn refresh_resets_the_clock() {
        let tmp = setup_fixtures();
        let cache = cache_for(tmp.path());
        let t0 = Instant::now();

        cache.get_at(t0);
        let refreshed = cache.get_at(t0 + Duration::from_secs(6));
        let hit = cache.get_at(t0 + Duration::from_secs(10));
        assert!(Arc::ptr_eq(&refreshed, &hit));
    }

    #[test]
    fn empty_catalog_is_cached_too() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("images");
        let cache = cache_for(&root);
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        assert!(first.is_empty());
        let second = cache.get_at(t0 + Duration::from_secs(1));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalidate_forces_rescan() {
        let tmp = setup_fixtures();
        let cache = cache_for(tmp.path());
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        fs::remove_dir_all(tmp.path().join("美食")).unwrap();
        cache.invalidate();

        let second = cache.get_at(t0 + Duration::from_secs(1));
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.find_category("美食").is_none());
    }

    #[test]
    fn zero_ttl_rescans_on_every_later_call() {
        let tmp = setup_fixtures();
        let cache = CatalogCache::new(tmp.path(), ExtensionFilter::default(), Duration::ZERO);
        let t0 = Instant::now();

        let first = cache.get_at(t0);
        let same_instant = cache.get_at(t0);
        let later = cache.get_at(t0 + Duration::from_nanos(1));
        assert!(Arc::ptr_eq(&first, &same_instant));
        assert!(!Arc::ptr_eq(&first, &later));
    }

    #[test]
    fn shared_across_threads() {
        let tmp = setup_fixtures();
        let cache = Arc::new(cache_for(tmp.path()));
        let expected = cache.get();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get())
            })
            .collect();
        for handle in handles {
            let catalog = handle.join().unwrap();
            assert_eq!(*catalog, *expected);
        }
    }
}
