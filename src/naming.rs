//! Folder-name parsing for album titles and dates.
//!
//! Album directories carry their date in the name, either before or after a
//! free-form title. Two date notations are recognized:
//!
//! - **Long form**: `2025 年 8 月 24 日`, with the day part optional
//!   (`2025 年 8 月`). Whitespace around the markers is free.
//! - **Numeric**: `2025-08-24`, `2025/8/24`, `2025.08`, with `-`, `/` or `.`
//!   between the parts and the day optional.
//!
//! ## Examples
//!
//! - `天安门 2025 年 8 月 24 日` → title "天安门", date 2025-08-24
//! - `2025 年 8 月 长城` → title "长城", date 2025-08-01
//! - `2025-08 Hiking` → title "Hiking", date 2025-08-01
//! - `Beach 2024.7.3` → title "Beach", date 2024-07-03
//! - `Family` → title "Family", no date
//!
//! ## Rule Table
//!
//! Matching is driven by [`date_rules`], an ordered table of [`DateRule`]s.
//! Every long-form rule is tried before any numeric rule, and within a
//! notation "title then date" is tried before "date then title". The first
//! rule matching the *whole* name wins.
//!
//! A rule that matches but names an impossible date (month 13, February 30)
//! still wins: the title it extracted is kept and the date is `None`. Later
//! rules are not consulted.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// The way a date is written in a folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `YYYY 年 M 月 [D 日]`
    LongForm,
    /// `YYYY-M[-D]` with `-`, `/` or `.` separators
    Numeric,
}

/// Where the title sits relative to the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    TitleFirst,
    DateFirst,
}

/// One entry of the rule table: a notation, a layout and the compiled
/// whole-name pattern for that combination.
///
/// Every pattern exposes the named groups `title`, `date`, `y`, `m` and
/// optionally `d`.
#[derive(Debug)]
pub struct DateRule {
    pub notation: Notation,
    pub layout: Layout,
    pattern: Regex,
}

impl DateRule {
    fn new(notation: Notation, layout: Layout) -> Self {
        let date = match notation {
            Notation::LongForm => LONG_FORM_DATE,
            Notation::Numeric => NUMERIC_DATE,
        };
        // A leading title must be non-empty; a trailing one may be empty so
        // that date-only names keep every digit of the date.
        let source = match layout {
            Layout::TitleFirst => format!(r"^(?P<title>.+?)\s*(?P<date>{date})$"),
            Layout::DateFirst => format!(r"^(?P<date>{date})\s*(?P<title>.*?)$"),
        };
        let pattern = Regex::new(&source).expect("date rule patterns are static and valid");
        Self {
            notation,
            layout,
            pattern,
        }
    }

    /// Apply this rule to a whole (already trimmed) folder name.
    ///
    /// Returns `None` if the rule does not match. A match with an invalid
    /// calendar date returns `Some` with `date: None`.
    pub fn apply(&self, name: &str) -> Option<ParsedName> {
        let caps = self.pattern.captures(name)?;

        let date = to_date(
            &caps["y"],
            &caps["m"],
            caps.name("d").map(|d| d.as_str()),
        );

        let mut title = caps
            .name("title")
            .map(|t| t.as_str().trim())
            .unwrap_or_default()
            .to_string();
        if title.is_empty() {
            let span = caps.name("date").map(|m| m.range()).unwrap_or(0..0);
            title = title_without_date(name, span);
        }

        Some(ParsedName {
            title,
            date,
            rule: Some((self.notation, self.layout)),
        })
    }
}

// `\d` is Unicode-aware: full-width and other decimal digits match too.
const LONG_FORM_DATE: &str =
    r"(?P<y>\d{4})\s*年\s*(?P<m>\d{1,2})\s*月(?:\s*(?P<d>\d{1,2})\s*日)?";

const NUMERIC_DATE: &str = r"(?P<y>\d{4})[-/.](?P<m>\d{1,2})(?:[-/.](?P<d>\d{1,2}))?";

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is static and valid"));

/// Characters stripped from both ends of a title derived by cutting the date
/// out of the name.
const TITLE_SEPARATORS: &[char] = &['-', '_', '·', ',', '，'];

static DATE_RULES: LazyLock<Vec<DateRule>> = LazyLock::new(|| {
    vec![
        DateRule::new(Notation::LongForm, Layout::TitleFirst),
        DateRule::new(Notation::LongForm, Layout::DateFirst),
        DateRule::new(Notation::Numeric, Layout::TitleFirst),
        DateRule::new(Notation::Numeric, Layout::DateFirst),
    ]
});

/// The rule table in priority order.
pub fn date_rules() -> &'static [DateRule] {
    &DATE_RULES
}

/// Result of parsing an album folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Display title. Never empty for a non-empty input.
    pub title: String,
    /// Calendar date, day defaulting to 1. `None` when no rule matched or the
    /// matched numbers don't form a valid date.
    pub date: Option<NaiveDate>,
    /// The rule that matched, if any.
    pub rule: Option<(Notation, Layout)>,
}

/// Parse a folder name into a title and an optional date.
///
/// Never fails: a name with no recognizable date becomes its own title.
pub fn parse_folder_name(folder_name: &str) -> ParsedName {
    let name = folder_name.trim();
    date_rules()
        .iter()
        .find_map(|rule| rule.apply(name))
        .unwrap_or_else(|| ParsedName {
            title: name.to_string(),
            date: None,
            rule: None,
        })
}

fn to_date(year: &str, month: &str, day: Option<&str>) -> Option<NaiveDate> {
    let year = i32::try_from(parse_decimal(year)?).ok()?;
    let month = parse_decimal(month)?;
    let day = match day {
        Some(d) => parse_decimal(d)?,
        None => 1,
    };
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit (general category `Nd`).
///
/// `Nd` characters are encoded in runs of whole 0..9 sequences, so the value
/// is the distance from the start of the run, modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(v) = c.to_digit(10) {
        return Some(v);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32)
        && is_decimal_digit(prev)
    {
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

/// Parse a run of decimal digits from any script.
fn parse_decimal(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u32, |acc, c| {
        acc.checked_mul(10)?.checked_add(digit_value(c)?)
    })
}

/// Cut the date span out of `name` and trim separators; falls back to the
/// whole name when nothing is left.
fn title_without_date(name: &str, span: std::ops::Range<usize>) -> String {
    let rest = format!("{}{}", &name[..span.start], &name[span.end..]);
    let trimmed = rest.trim_matches(|c: char| c.is_whitespace() || TITLE_SEPARATORS.contains(&c));
    if trimmed.is_empty() {
        name.to_string()
    } else {
        trimmed.to_string()
    }
}
