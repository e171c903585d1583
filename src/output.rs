//! Presentation helpers: date labels and CLI output.
//!
//! # Date Labels
//!
//! [`format_date`] renders an album date as a long-form phrase,
//! `2025 年 8 月 24 日`, or as `未标注日期` ("date unknown") when the folder
//! name carried no usable date.
//!
//! # Output Format
//!
//! ## Catalog
//!
//! ```text
//! 001 旅行 (4 albums, 5 photos)
//!     Cover: 旅行/天安门 2025 年 8 月 24 日/001.jpg
//!     001 天安门 · 2025 年 8 月 24 日 (2 photos)
//!         Source: 旅行/天安门 2025 年 8 月 24 日/
//!     002 Random Snaps · 未标注日期 (1 photo)
//!         Source: 旅行/Random Snaps/
//!
//! 2 categories, 5 albums, 7 photos
//! ```
//!
//! ## Album
//!
//! ```text
//! 天安门 · 2025 年 8 月 24 日 (2 photos)
//!     Source: 旅行/天安门 2025 年 8 月 24 日/
//!     001 001.jpg
//!     002 002.JPG
//! ```
//!
//! Each view has a `format_*` function returning lines, for testability, and
//! a `print_*` wrapper that writes to stdout.

use crate::types::{Album, Catalog, Category};
use chrono::{Datelike, NaiveDate};

/// Label shown for albums without a date.
pub const UNKNOWN_DATE: &str = "未标注日期";

/// Render an optional album date for display.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{} 年 {} 月 {} 日", d.year(), d.month(), d.day()),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// `count` followed by the singular or plural noun.
fn counted(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn album_header(album: &Album) -> String {
    format!(
        "{} · {} ({})",
        album.title,
        format_date(album.date),
        counted(album.images.len(), "photo", "photos")
    )
}

fn category_header(category: &Category) -> String {
    format!(
        "{} ({}, {})",
        category.name,
        counted(category.total_albums(), "album", "albums"),
        counted(category.total_images(), "photo", "photos")
    )
}

/// Indented cover line and album entries under a category header.
fn category_lines(category: &Category) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(cover) = category.cover_path() {
        lines.push(format!("    Cover: {cover}"));
    }
    for (i, album) in category.albums.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), album_header(album)));
        lines.push(format!("        Source: {}/", album.relative_path));
    }
    lines
}

/// Format the whole catalog: categories, their albums, and a totals line.
pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    if catalog.is_empty() {
        return vec!["No albums found".to_string()];
    }

    let mut lines = Vec::new();
    for (i, category) in catalog.categories().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), category_header(category)));
        lines.extend(category_lines(category));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}",
        counted(catalog.categories().len(), "category", "categories"),
        counted(catalog.total_albums(), "album", "albums"),
        counted(catalog.total_images(), "photo", "photos")
    ));
    lines
}

/// Format a single category.
pub fn format_category(category: &Category) -> Vec<String> {
    let mut lines = vec![category_header(category)];
    lines.extend(category_lines(category));
    lines
}

/// Format a single album with its images.
pub fn format_album(album: &Album) -> Vec<String> {
    let mut lines = vec![
        album_header(album),
        format!("    Source: {}/", album.relative_path),
    ];
    for (i, image) in album.images.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), image));
    }
    lines
}

pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{}", line);
    }
}

pub fn print_category(category: &Category) {
    for line in format_category(category) {
        println!("{}", line);
    }
}

pub fn print_album(album: &Album) {
    for line in format_album(album) {
        println!("{}", line);
    }
}
