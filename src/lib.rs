//! # Dated Gallery
//!
//! A read-only photo catalog built straight from the filesystem. Top-level
//! directories are categories, their subdirectories are albums, and album
//! folder names carry the title and date:
//!
//! ```text
//! images/
//! ├── 旅行/
//! │   ├── 天安门 2025 年 8 月 24 日/   → "天安门", 2025-08-24
//! │   └── 2025-08 Hiking/              → "Hiking", 2025-08-01
//! └── 美食/
//!     └── Dumplings/                   → "Dumplings", no date
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Gallery → CatalogCache::get ─┬─ fresh → cached Arc<Catalog>
//!                              └─ stale → scan → order → store → Arc<Catalog>
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Folder name → title and optional date, driven by an ordered rule table |
//! | [`scan`] | Two-level directory walk and the image extension filter |
//! | [`ordering`] | Category and album display order |
//! | [`cache`] | Time-to-live memoization of scan results |
//! | [`gallery`] | Service object: catalog, category/album lookups, media path resolution |
//! | [`media`] | Root-confined resolution of media request paths |
//! | [`types`] | `Album`, `Category`, `Catalog` value types |
//! | [`config`] | `gallery.toml` loading, merging, and validation |
//! | [`output`] | Date labels and CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is the Index
//!
//! There is no database and no manifest. Every scan rebuilds the catalog
//! from directory listings, and the cache only decides how often that
//! happens. Renaming a folder is the whole editing workflow.
//!
//! ## Lenient Scanning
//!
//! A missing root is an empty gallery. Unreadable directories are logged and
//! skipped. Folder names that carry no date still produce a title. The only
//! hard errors come from a malformed config file.

pub mod cache;
pub mod config;
pub mod gallery;
pub mod media;
pub mod naming;
pub mod ordering;
pub mod output;
pub mod scan;
pub mod types;

pub use gallery::Gallery;

#[cfg(test)]
pub(crate) mod test_helpers;
