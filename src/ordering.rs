//! Display order for categories and albums.
//!
//! Categories sort by name, ascending. `str` ordering is byte order over
//! UTF-8, which is Unicode code point order, so mixed-script names sort the
//! same way on every platform.
//!
//! Albums sort newest first: dated albums before undated ones, later dates
//! before earlier ones, and the title (descending) as the tie-break and as
//! the only key among undated albums. Both sorts are stable.

use crate::types::{Album, Category};
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Date standing in for a missing one in [`album_sort_key`]: 0001-01-01.
pub fn undated_sort_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Composite album key, compared descending.
///
/// Undated albums use [`undated_sort_date`] as their date; the `has_date`
/// flag keeps them after every dated album regardless.
pub fn album_sort_key(album: &Album) -> (bool, NaiveDate, &str) {
    (
        album.date.is_some(),
        album.date.unwrap_or_else(undated_sort_date),
        album.title.as_str(),
    )
}

pub fn sort_albums(albums: &mut [Album]) {
    albums.sort_by(|a, b| Reverse(album_sort_key(a)).cmp(&Reverse(album_sort_key(b))));
}

pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
}
