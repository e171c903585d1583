//! Filesystem scanning and catalog assembly.
//!
//! ## Directory Structure
//!
//! The scanner reads exactly two levels below the root:
//!
//! ```text
//! images/                              # Root
//! ├── 旅行/                            # Category
//! │   ├── 天安门 2025 年 8 月 24 日/   # Album (title + date in the name)
//! │   │   ├── 001.jpg
//! │   │   └── 002.png
//! │   ├── 2025-08 Hiking/              # Album (date first)
//! │   │   └── trail.webp
//! │   └── drafts/                      # No images → dropped
//! │       └── notes.txt
//! └── 美食/
//!     └── Dumplings 2023-02-14/
//!         └── dumpling.jpg
//! ```
//!
//! Files directly under the root or directly under a category are ignored,
//! as is anything nested deeper than an album's own files.
//!
//! ## Rules
//!
//! - An album is a category subdirectory with at least one image file.
//! - A category is a root subdirectory with at least one album.
//! - Album title and date come from [`parse_folder_name`].
//! - Albums and categories are ordered by [`crate::ordering`].
//!
//! ## Failure Handling
//!
//! A missing root yields an empty catalog. A directory that can't be read
//! (permissions, deleted mid-scan) or an entry whose name isn't valid UTF-8
//! is logged and skipped; the rest of the tree is still scanned.

use crate::naming::parse_folder_name;
use crate::ordering::{sort_albums, sort_categories};
use crate::types::{Album, Catalog, Category};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extensions recognized as images when no other list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Classifies files as catalogable images by extension.
///
/// Matching is case-insensitive and looks at the extension only; file
/// contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    /// Lowercase, without the leading dot.
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter from an allow-list. Entries may be given with or
    /// without a leading dot and in any case.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether the path's extension is on the allow-list. Does not touch
    /// the filesystem.
    pub fn allows_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|allowed| *allowed == ext)
    }

    /// Whether `path` is a regular file (symlinks followed) with an allowed
    /// extension.
    pub fn is_image(&self, path: &Path) -> bool {
        path.is_file() && self.allows_extension(path)
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Scan `root` into a catalog.
pub fn scan(root: &Path, filter: &ExtensionFilter) -> Catalog {
    if !root.exists() {
        debug!(root = %root.display(), "image root does not exist, catalog is empty");
        return Catalog::default();
    }

    let started = Instant::now();
    let mut categories = Vec::new();

    for (name, path) in subdirectories(root) {
        let albums = scan_category(root, &name, &path, filter);
        if albums.is_empty() {
            debug!(category = %name, "no albums with images, skipping category");
            continue;
        }
        categories.push(Category { name, albums });
    }

    sort_categories(&mut categories);
    let catalog = Catalog::new(categories);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        root = %root.display(),
        categories = catalog.categories().len(),
        albums = catalog.total_albums(),
        images = catalog.total_images(),
        elapsed_ms,
        "scanned image root"
    );
    catalog
}

fn scan_category(root: &Path, category: &str, path: &Path, filter: &ExtensionFilter) -> Vec<Album> {
    let mut albums: Vec<Album> = subdirectories(path)
        .into_iter()
        .filter_map(|(folder, album_path)| build_album(root, category, folder, &album_path, filter))
        .collect();
    sort_albums(&mut albums);
    albums
}

fn build_album(
    root: &Path,
    category: &str,
    folder: String,
    path: &Path,
    filter: &ExtensionFilter,
) -> Option<Album> {
    let images: Vec<String> = list_dir(path)
        .into_iter()
        .filter(|(_, p)| filter.is_image(p))
        .map(|(name, _)| name)
        .collect();

    if images.is_empty() {
        debug!(category, folder = %folder, "no images, skipping album");
        return None;
    }

    let parsed = parse_folder_name(&folder);
    debug!(
        category,
        folder = %folder,
        title = %parsed.title,
        date = ?parsed.date,
        images = images.len(),
        "found album"
    );

    Some(Album {
        category: category.to_string(),
        title: parsed.title,
        date: parsed.date,
        relative_path: relative_path(root, path),
        folder,
        images,
    })
}

/// Entries of `dir` as `(name, path)`, sorted by name.
///
/// Never fails: an unreadable directory yields no entries, and entries that
/// can't be read or have non-UTF-8 names are dropped. Both are logged.
fn list_dir(dir: &Path) -> Vec<(String, PathBuf)> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for entry in read {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        match entry.file_name().into_string() {
            Ok(name) => entries.push((name, entry.path())),
            Err(_) => {
                warn!(path = %entry.path().display(), "skipping entry with non-UTF-8 name");
            }
        }
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn subdirectories(dir: &Path) -> Vec<(String, PathBuf)> {
    list_dir(dir)
        .into_iter()
        .filter(|(_, p)| p.is_dir())
        .collect()
}

/// `path` relative to `root`, joined with `/` on every platform.
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
