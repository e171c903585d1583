//! Catalog value types.
//!
//! Every scan builds these from scratch; nothing mutates them afterwards.
//! Counts and cover paths are computed on demand rather than stored, so a
//! value can never disagree with its own contents.

use chrono::NaiveDate;
use serde::Serialize;

/// A leaf directory of images: `<root>/<category>/<folder>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    /// Name of the parent (category) directory.
    pub category: String,
    /// Raw directory name; unique within the category.
    pub folder: String,
    /// Display title parsed from `folder`.
    pub title: String,
    /// Date parsed from `folder`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// `category/folder`, always `/`-separated.
    pub relative_path: String,
    /// Sorted image file names. Never empty.
    pub images: Vec<String>,
}

impl Album {
    /// Relative path of an image inside this album.
    pub fn image_path(&self, image: &str) -> String {
        format!("{}/{}", self.relative_path, image)
    }

    /// Relative path of the first image.
    pub fn cover_path(&self) -> Option<String> {
        self.images.first().map(|img| self.image_path(img))
    }

    /// Relative paths of all images, in album order.
    pub fn image_paths(&self) -> Vec<String> {
        self.images.iter().map(|img| self.image_path(img)).collect()
    }
}

/// A top-level directory grouping albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Directory name, which is also its relative path.
    pub name: String,
    /// Albums in display order. Never empty.
    pub albums: Vec<Album>,
}

impl Category {
    pub fn total_albums(&self) -> usize {
        self.albums.len()
    }

    pub fn total_images(&self) -> usize {
        self.albums.iter().map(|a| a.images.len()).sum()
    }

    /// Cover of the first album that has one.
    pub fn cover_path(&self) -> Option<String> {
        self.albums.iter().find_map(Album::cover_path)
    }

    pub fn find_album(&self, folder: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.folder == folder)
    }
}

/// The full result of one scan, categories in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_album(&self, category: &str, folder: &str) -> Option<&Album> {
        self.find_category(category)?.find_album(folder)
    }

    pub fn total_albums(&self) -> usize {
        self.categories.iter().map(Category::total_albums).sum()
    }

    pub fn total_images(&self) -> usize {
        self.categories.iter().map(Category::total_images).sum()
    }
}
