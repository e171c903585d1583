//! The catalog service handed to the web and presentation layers.
//!
//! [`Gallery`] owns a [`CatalogCache`] for one image root and answers the
//! lookups a router needs: the full catalog, one category, one album, and
//! the on-disk file behind a media URL. Every lookup misses with `None`,
//! never an error, so callers map a miss straight to "not found".
//!
//! Construct one per configured root and share it (`&Gallery` or
//! `Arc<Gallery>`); it is `Send + Sync`.

use crate::cache::CatalogCache;
use crate::config::GalleryConfig;
use crate::media::resolve_media_path;
use crate::scan::ExtensionFilter;
use crate::types::{Album, Catalog, Category};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct Gallery {
    cache: CatalogCache,
}

impl Gallery {
    pub fn new(root: impl Into<PathBuf>, filter: ExtensionFilter, ttl: Duration) -> Self {
        Self {
            cache: CatalogCache::new(root, filter, ttl),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(
            &config.library.images_root,
            config.extension_filter(),
            config.cache_ttl(),
        )
    }

    pub fn root(&self) -> &Path {
        self.cache.root()
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// All categories in display order.
    pub fn list_categories(&self) -> Arc<Catalog> {
        self.cache.get()
    }

    pub fn find_category(&self, name: &str) -> Option<Category> {
        self.cache.get().find_category(name).cloned()
    }

    pub fn find_album(&self, category: &str, folder: &str) -> Option<Album> {
        self.cache.get().find_album(category, folder).cloned()
    }

    /// Absolute path of the image behind `request`, a root-relative media
    /// path. See [`crate::media`] for the rules.
    pub fn resolve_media_path(&self, request: &str) -> Option<PathBuf> {
        resolve_media_path(self.cache.root(), self.cache.filter(), request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::test_helpers::*;

    fn gallery_for(root: &Path) -> Gallery {
        Gallery::new(root, ExtensionFilter::default(), DEFAULT_TTL)
    }

    #[test]
    fn list_categories_is_cached() {
        let tmp = setup_fixtures();
        let gallery = gallery_for(tmp.path());
        let first = gallery.list_categories();
        let second = gallery.list_categories();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn find_category_and_album() {
        let tmp = setup_fixtures();
        let gallery = gallery_for(tmp.path());

        let food = gallery.find_category("美食").unwrap();
        assert_eq!(food.total_images(), 2);
        assert!(gallery.find_category("Notes").is_none());

        let album = gallery.find_album("美食", "Dumplings 2023-02-14").unwrap();
        assert_eq!(album.title, "Dumplings");
        assert_eq!(album.images, vec!["b.jpeg", "dumpling.bmp"]);
        assert!(gallery.find_album("美食", "Dumplings").is_none());
        assert!(gallery.find_album("旅行", "Dumplings 2023-02-14").is_none());
    }

    #[test]
    fn every_cover_resolves_to_a_file() {
        let tmp = setup_fixtures();
        let gallery = gallery_for(tmp.path());
        for category in gallery.list_categories().categories() {
            let cover = category.cover_path().unwrap();
            assert!(gallery.resolve_media_path(&cover).is_some(), "{cover}");
        }
    }

    #[test]
    fn from_config_uses_configured_root() {
        let tmp = setup_fixtures();
        let mut config = GalleryConfig::default();
        config.library.images_root = tmp.path().to_path_buf();
        config.library.extensions = vec!["gif".to_string()];

        let gallery = Gallery::from_config(&config);
        let catalog = gallery.list_categories();
        assert_eq!(category_names(&catalog), vec!["旅行"]);
        assert_eq!(catalog.total_images(), 1);
        assert!(gallery.resolve_media_path("美食/Dumplings 2023-02-14/b.jpeg").is_none());
    }
}
