// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! Row-level errors. These never abort a run; the collector logs and skips.

/// Why a single announcement row could not be turned into a feed item.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("title anchor has no href attribute (row {row})")]
    MissingHref { row: usize },
}
