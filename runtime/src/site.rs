// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed facts about the LDSH announcement page and the feed built from it.

use std::time::Duration;

/// Announcement list page.
pub const LIST_URL: &str = "https://www.ldsh.ilc.edu.tw/p/403-1015-25-1.php?Lang=zh-tw";

/// Origin prepended to relative announcement links.
pub const ORIGIN: &str = "https://www.ldsh.ilc.edu.tw";

/// Table holding the announcement rows.
pub const TABLE_SELECTOR: &str = "table.listTB";

/// Markers the site uses for pinned ("置頂") announcements inside the title cell.
pub const PIN_MARKER_SELECTOR: &str = r#"i.fa-thumb-tack, i.fa-thumbtack, .pin, .top-icon, img[alt="置頂"], img[title="置頂"]"#;

/// Scrolls the page to the bottom and nudges lazy loaders listening for `scroll`.
/// Evaluates to the new scroll height so the caller gets a value back.
pub const SCROLL_SCRIPT: &str = r#"(() => {
    window.scrollTo(0, document.body.scrollHeight);
    window.dispatchEvent(new Event('scroll'));
    return document.body.scrollHeight;
})()"#;

pub const MAX_SCROLLS: u32 = 10;
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Navigation and selector waits give up after this long.
pub const PAGE_TIMEOUT_MS: u64 = 30_000;

pub const OUTPUT_FILE: &str = "ldsh_announcements.xml";

pub const FEED_TITLE: &str = "LDSH Announcements";
pub const FEED_LINK: &str = "https://www.ldsh.ilc.edu.tw/";
pub const FEED_DESCRIPTION: &str = "最新公告";
pub const FEED_LANGUAGE: &str = "zh-tw";

/// Namespace for the per-item `<ldsh:pinned>` extension.
pub const FEED_NS_PREFIX: &str = "ldsh";
pub const FEED_NS_URI: &str = "https://www.ldsh.ilc.edu.tw/ns/rss";

/// Offset of the site's local dates (Asia/Taipei, no DST).
pub const SITE_UTC_OFFSET_SECS: i32 = 8 * 3600;
