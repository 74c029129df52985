// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Turn raw announcement rows into feed records.
//!
//! Text is trimmed and scrubbed of control characters, links are made
//! absolute against the site origin, and `YYYY-MM-DD` dates become
//! midnight in the site's offset. Unparseable dates fall back to "now".

use crate::site;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use serde::Serialize;
use url::Url;

/// Cell contents of one announcement row, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Text of cell 0.
    pub date_text: String,
    /// Text of the anchor in cell 2.
    pub title_text: String,
    /// `href` of the anchor in cell 2, as written in the markup.
    pub href: String,
    /// Whether cell 2 carries a pin marker.
    pub pinned: bool,
}

/// Normalized title and resolved link; the deduplication key of an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnouncementKey {
    pub title: String,
    pub link: String,
}

impl AnnouncementKey {
    pub fn of(row: &RawRow) -> Self {
        Self {
            title: sanitize_text(&row.title_text),
            link: resolve_link(&row.href),
        }
    }

    /// Single-string identity, `title:link`.
    pub fn identity(&self) -> String {
        format!("{}:{}", self.title, self.link)
    }
}

/// A feed-ready announcement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementRecord {
    pub title: String,
    pub link: String,
    pub pub_date: DateTime<FixedOffset>,
    pub pinned: bool,
    /// True when the row's date could not be parsed and `pub_date` is the normalization time.
    pub date_fallback: bool,
}

/// Build the record for a row whose key has already passed deduplication.
pub fn into_record(
    key: AnnouncementKey,
    row: &RawRow,
    now: DateTime<FixedOffset>,
) -> AnnouncementRecord {
    let date_text = sanitize_text(&row.date_text);
    let (pub_date, date_fallback) = match parse_pub_date(&date_text) {
        Some(date) => (date, false),
        None => (now, true),
    };

    AnnouncementRecord {
        title: key.title,
        link: key.link,
        pub_date,
        pinned: row.pinned,
        date_fallback,
    }
}

/// Convenience for callers that do not deduplicate.
pub fn normalize(row: &RawRow, now: DateTime<FixedOffset>) -> AnnouncementRecord {
    into_record(AnnouncementKey::of(row), row, now)
}

/// Trim, then drop every character below U+0020 other than `\n`, `\r` and `\t`.
pub fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|&c| c >= ' ' || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Make `href` absolute. Anything that already carries a scheme is kept as is.
pub fn resolve_link(href: &str) -> String {
    let href = href.trim();
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    if href.starts_with("//") {
        return format!("https:{href}");
    }
    if href.starts_with('/') {
        format!("{}{href}", site::ORIGIN)
    } else {
        format!("{}/{href}", site::ORIGIN)
    }
}

/// Parse a `YYYY-MM-DD` cell as midnight in the site's offset.
pub fn parse_pub_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    site_offset()
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()
}

pub fn site_offset() -> FixedOffset {
    FixedOffset::east_opt(site::SITE_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Wall-clock time in the site's offset.
pub fn site_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&site_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, title: &str, href: &str) -> RawRow {
        RawRow {
            date_text: date.to_string(),
            title_text: title.to_string(),
            href: href.to_string(),
            pinned: false,
        }
    }

    #[test]
    fn test_sanitize_strips_control_chars_but_keeps_whitespace_controls() {
        let dirty = "  \u{1}開學\u{7}典禮\n公告\t(二)\r\u{1f}  ";
        let clean = sanitize_text(dirty);
        assert_eq!(clean, "開學典禮\n公告\t(二)\r");
        assert!(clean.chars().all(|c| c >= ' ' || matches!(c, '\n' | '\r' | '\t')));
    }

    #[test]
    fn test_sanitize_trims_before_filtering() {
        // U+0001 is not whitespace, so the space after it survives the trim.
        assert_eq!(sanitize_text("\u{1} title "), " title");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link("/p/406-1015-12345,r25.php?Lang=zh-tw"),
            "https://www.ldsh.ilc.edu.tw/p/406-1015-12345,r25.php?Lang=zh-tw"
        );
        assert_eq!(
            resolve_link("p/406-1015-1.php"),
            "https://www.ldsh.ilc.edu.tw/p/406-1015-1.php"
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_links() {
        assert_eq!(
            resolve_link("https://forms.gle/abc"),
            "https://forms.gle/abc"
        );
        assert_eq!(
            resolve_link("http://example.org/x"),
            "http://example.org/x"
        );
        assert_eq!(
            resolve_link("//cdn.example.org/a.pdf"),
            "https://cdn.example.org/a.pdf"
        );
    }

    #[test]
    fn test_parse_pub_date() {
        let date = parse_pub_date("2024-09-03").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-09-03T00:00:00+08:00");
        assert!(parse_pub_date("2024/09/03").is_none());
        assert!(parse_pub_date("113-09-03x").is_none());
        assert!(parse_pub_date("").is_none());
    }

    #[test]
    fn test_malformed_date_falls_back_to_now() {
        let now = site_now();
        let record = normalize(&row("下週一", "停課通知", "/p/1.php"), now);
        assert!(record.date_fallback);
        assert_eq!(record.pub_date, now);
    }

    #[test]
    fn test_date_text_is_sanitized_before_parsing() {
        let now = site_now();
        let record = normalize(&row(" \u{2}2024-01-05\u{3} ", "t", "/a"), now);
        assert!(!record.date_fallback);
        assert_eq!(record.pub_date.to_rfc3339(), "2024-01-05T00:00:00+08:00");
    }

    #[test]
    fn test_identity_uses_normalized_fields() {
        let a = AnnouncementKey::of(&row("2024-01-01", "  校慶\u{1} ", "/p/9.php"));
        let b = AnnouncementKey::of(&row("2024-02-02", "校慶", "https://www.ldsh.ilc.edu.tw/p/9.php"));
        assert_eq!(a, b);
        assert_eq!(a.identity(), "校慶:https://www.ldsh.ilc.edu.tw/p/9.php");
    }

    #[test]
    fn test_pinned_flag_carries_over() {
        let mut r = row("2024-03-01", "置頂公告", "/p/2.php");
        r.pinned = true;
        assert!(normalize(&r, site_now()).pinned);
    }
}
