//! Shared test utilities.
//!
//! Fixture setup, tree builders, and catalog lookups that panic with the
//! available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = scan(tmp.path(), &ExtensionFilter::default());
//!
//! let travel = find_category(&catalog, "旅行");
//! assert_eq!(album_titles(travel)[0], "天安门");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Album, Catalog, Category};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/images/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/images");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create `root/category/album/` containing the given (fake) files.
pub fn write_album(root: &Path, category: &str, album: &str, files: &[&str]) {
    let dir = root.join(category).join(album);
    std::fs::create_dir_all(&dir).unwrap();
    for file in files {
        std::fs::write(dir.join(file), "fake image").unwrap();
    }
}

// =========================================================================
// Catalog lookups: panic with the available names on a miss
// =========================================================================

/// Find a category by name. Panics if not found.
pub fn find_category<'a>(catalog: &'a Catalog, name: &str) -> &'a Category {
    catalog.find_category(name).unwrap_or_else(|| {
        let names = category_names(catalog);
        panic!("category '{name}' not found. Available: {names:?}")
    })
}

/// Find an album by category name and folder. Panics if not found.
pub fn find_album<'a>(catalog: &'a Catalog, category: &str, folder: &str) -> &'a Album {
    let cat = find_category(catalog, category);
    cat.find_album(folder).unwrap_or_else(|| {
        let folders = album_folders(cat);
        panic!("album '{folder}' not found in '{category}'. Available: {folders:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All category names in catalog order.
pub fn category_names(catalog: &Catalog) -> Vec<&str> {
    catalog.categories().iter().map(|c| c.name.as_str()).collect()
}

/// All album folders in category order.
pub fn album_folders(category: &Category) -> Vec<&str> {
    category.albums.iter().map(|a| a.folder.as_str()).collect()
}

/// All album titles in category order.
pub fn album_titles(category: &Category) -> Vec<&str> {
    category.albums.iter().map(|a| a.title.as_str()).collect()
}
