// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Read announcement rows out of a rendered page snapshot.

use crate::error::RowError;
use crate::feed::RawRow;
use crate::site;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

struct RowSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    anchor: Selector,
    pin: Selector,
}

fn selectors() -> &'static RowSelectors {
    static SELECTORS: OnceLock<RowSelectors> = OnceLock::new();
    SELECTORS.get_or_init(|| RowSelectors {
        table: Selector::parse(site::TABLE_SELECTOR).unwrap(),
        row: Selector::parse("tr").unwrap(),
        cell: Selector::parse("td").unwrap(),
        anchor: Selector::parse("a").unwrap(),
        pin: Selector::parse(site::PIN_MARKER_SELECTOR).unwrap(),
    })
}

/// Every announcement row in every `table.listTB`, in document order.
///
/// Rows that are not announcements (header rows, rows with fewer than three
/// cells, title cells without a link) are skipped silently. Rows that look
/// like announcements but cannot be read come back as errors.
pub fn extract_rows(html: &str) -> Vec<Result<RawRow, RowError>> {
    let document = Html::parse_document(html);
    let sel = selectors();

    let mut rows = Vec::new();
    let mut index = 0;
    for table in document.select(&sel.table) {
        for tr in table.select(&sel.row) {
            index += 1;
            if let Some(row) = read_row(tr, index, sel) {
                rows.push(row);
            }
        }
    }
    rows
}

fn read_row(
    tr: ElementRef<'_>,
    index: usize,
    sel: &RowSelectors,
) -> Option<Result<RawRow, RowError>> {
    let cells: Vec<ElementRef<'_>> = tr.select(&sel.cell).collect();
    if cells.len() < 3 {
        return None;
    }

    let title_cell = cells[2];
    let anchor = title_cell.select(&sel.anchor).next()?;

    let Some(href) = anchor.value().attr("href") else {
        return Some(Err(RowError::MissingHref { row: index }));
    };

    Some(Ok(RawRow {
        date_text: cells[0].text().collect(),
        title_text: anchor.text().collect(),
        href: href.to_string(),
        pinned: title_cell.select(&sel.pin).next().is_some(),
    }))
}

/// Number of `<tr>` elements across all announcement tables.
pub fn count_rows(html: &str) -> usize {
    let document = Html::parse_document(html);
    let sel = selectors();
    document
        .select(&sel.table)
        .map(|table| table.select(&sel.row).count())
        .sum()
}
